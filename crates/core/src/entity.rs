//! Records the remote API identifies by an opaque id.

/// A record whose identity is assigned by the API.
///
/// Ids are strings on the wire, so the trait works on their string form.
pub trait Entity {
    type Id: AsRef<str> + Clone + Eq + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Records decoded from partial payloads may not carry an id.
    fn has_identity(&self) -> bool {
        !self.id().as_ref().trim().is_empty()
    }

    /// Whether this is the record with id `id`.
    fn is(&self, id: &str) -> bool {
        self.id().as_ref() == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(String);

    impl Entity for Row {
        type Id = String;

        fn id(&self) -> &String {
            &self.0
        }
    }

    #[test]
    fn blank_ids_have_no_identity() {
        assert!(Row("p-1".into()).has_identity());
        assert!(!Row("  ".into()).has_identity());
    }

    #[test]
    fn matches_by_exact_id() {
        let row = Row("p-1".into());
        assert!(row.is("p-1"));
        assert!(!row.is("p-10"));
    }
}
