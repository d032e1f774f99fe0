//! `content-admin`: terminal shell over the panel views.
//!
//! The browser build has no binary entry point; the Leptos frontend starts
//! from the library's `wasm_bindgen(start)` hook instead.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, Result, bail};
#[cfg(not(target_arch = "wasm32"))]
use clap::{Args, Parser, Subcommand};

#[cfg(not(target_arch = "wasm32"))]
use content_admin_auth::{MemoryTokenStore, SessionStatus, TokenClaims, TokenStore, init_session};
#[cfg(not(target_arch = "wasm32"))]
use content_admin_client::{ApiClient, ProductApi};
#[cfg(not(target_arch = "wasm32"))]
use content_admin_core::ProductId;
#[cfg(not(target_arch = "wasm32"))]
use content_admin_panel::terminal::TerminalPrompt;
#[cfg(not(target_arch = "wasm32"))]
use content_admin_panel::{
    AssumeYes, ContentsView, DashboardView, DeleteOutcome, EditorView, PanelConfig, Prompt,
    SettingsView,
};
#[cfg(not(target_arch = "wasm32"))]
use content_admin_products::{FormField, ImageSelection, Product};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(name = "content-admin", version, about = "Manage product/content listings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Subcommand)]
enum Command {
    /// Headline figures and the most recent records.
    Dashboard,
    /// One page of the content list.
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Every field of one record.
    Show { id: ProductId },
    /// Upload an image and create a record with it.
    Create(CreateArgs),
    /// Change some fields of an existing record.
    Edit {
        id: ProductId,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete a record after confirmation.
    Delete {
        id: ProductId,
        /// Skip the confirmation question.
        #[arg(long, short)]
        yes: bool,
    },
    /// Upload an image and print its key and URL.
    Upload { path: PathBuf },
    /// Show how the panel is configured.
    Settings,
    /// Describe the configured bearer token.
    Token,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    content: String,
    #[arg(long)]
    phone: String,
    /// YYYY-MM-DD
    #[arg(long)]
    start: String,
    /// YYYY-MM-DD, after --start
    #[arg(long)]
    end: String,
    /// DAILY, WEEKLY, or MONTHLY
    #[arg(long, default_value = "DAILY")]
    period: String,
    #[arg(long)]
    inactive: bool,
    #[arg(long)]
    image: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Args)]
struct EditArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    start: Option<String>,
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    period: Option<String>,
    #[arg(long)]
    active: Option<bool>,
    #[arg(long)]
    image: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = PanelConfig::from_env().context("invalid configuration")?;
    content_admin_observability::init(config.log_format);

    let tokens = Arc::new(MemoryTokenStore::new());
    let session = init_session(tokens.as_ref(), config.token.as_deref(), chrono::Utc::now());
    let api = ApiClient::new(config.api_client_config(), tokens.clone());
    let prompt = TerminalPrompt::stdio();

    tracing::debug!(?config, ?session, "content-admin starting");

    let shell = Shell {
        config: &config,
        api: &api,
        tokens: tokens.as_ref(),
        prompt: &prompt,
    };
    shell.run(cli.command, session).await
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
struct Shell<'a> {
    config: &'a PanelConfig,
    api: &'a ApiClient,
    tokens: &'a dyn TokenStore,
    prompt: &'a dyn Prompt,
}

#[cfg(not(target_arch = "wasm32"))]
impl Shell<'_> {
    async fn run(&self, command: Command, session: SessionStatus) -> Result<()> {
        match command {
            Command::Dashboard => self.dashboard().await,
            Command::List { page } => self.list(page).await,
            Command::Show { id } => self.show(&id).await,
            Command::Create(args) => self.create(args).await,
            Command::Edit { id, fields } => self.edit(id, fields).await,
            Command::Delete { id, yes } => self.delete(&id, yes).await,
            Command::Upload { path } => self.upload(&path).await,
            Command::Settings => {
                self.settings();
                Ok(())
            }
            Command::Token => {
                self.token(&session);
                Ok(())
            }
        }
    }

    async fn dashboard(&self) -> Result<()> {
        let mut view = DashboardView::new();
        view.load(self.api).await;

        let status = match view.connected() {
            Some(true) => "reachable",
            _ => "unreachable",
        };
        println!("API {} ({status})", self.config.api_url);
        if let Some(error) = view.error() {
            println!("! {error}");
        }

        let summary = view.summary();
        println!("Total products:    {}", summary.total_products);
        println!("Categories:        {}", summary.unique_categories);
        println!("Total value:       {}", summary.total_value_label());
        println!();
        println!("Recent:");
        for product in &summary.recent {
            print_row(product);
        }
        Ok(())
    }

    async fn list(&self, page: usize) -> Result<()> {
        let mut view = ContentsView::new(self.config.page_size);
        view.load(self.api).await;
        if let Some(error) = view.error() {
            bail!("{error}");
        }

        let page = view.go_to_page(page);
        if view.products().is_empty() {
            println!("No products yet.");
            return Ok(());
        }
        for product in view.page_items() {
            print_row(product);
        }
        if let Some(range) = view.range() {
            println!(
                "Showing {}-{} of {} (page {page}/{})",
                range.first,
                range.last,
                range.total,
                view.total_pages()
            );
        }
        Ok(())
    }

    async fn show(&self, id: &ProductId) -> Result<()> {
        let product = self
            .api
            .get_product(id)
            .await
            .with_context(|| format!("could not load product {id}"))?;

        println!("id:        {}", product.id);
        println!("title:     {}", product.display_title());
        println!("content:   {}", product.plain_content());
        println!("phone:     {}", product.phone_number);
        println!("window:    {} .. {}", product.start_date, product.end_date);
        println!("period:    {}", product.category_label());
        println!("active:    {}", product.is_active);
        println!(
            "image:     {}",
            product
                .image_url(&self.config.image_base_url)
                .unwrap_or_else(|| "-".to_string())
        );
        println!("created:   {}", product.created_label());
        Ok(())
    }

    async fn create(&self, args: CreateArgs) -> Result<()> {
        let mut view = EditorView::create(
            self.config.company_id.clone(),
            self.config.image_base_url.clone(),
        );
        view.set_field(FormField::Title, &args.title);
        view.set_field(FormField::Content, &args.content);
        view.set_field(FormField::PhoneNumber, &args.phone);
        view.set_field(FormField::StartDate, &args.start);
        view.set_field(FormField::EndDate, &args.end);
        view.set_field(FormField::PostingPeriodType, &args.period);
        view.set_active(!args.inactive);

        self.attach_image(&mut view, &args.image).await?;
        self.save(&mut view).await
    }

    async fn edit(&self, id: ProductId, fields: EditArgs) -> Result<()> {
        let mut view = EditorView::edit(
            id,
            self.config.company_id.clone(),
            self.config.image_base_url.clone(),
        );
        if view.load(self.api, self.prompt).await.is_some() {
            bail!("could not load the product");
        }

        let changes = [
            (FormField::Title, fields.title),
            (FormField::Content, fields.content),
            (FormField::PhoneNumber, fields.phone),
            (FormField::StartDate, fields.start),
            (FormField::EndDate, fields.end),
            (FormField::PostingPeriodType, fields.period),
        ];
        for (field, value) in changes {
            if let Some(value) = value {
                view.set_field(field, &value);
            }
        }
        if let Some(active) = fields.active {
            view.set_active(active);
        }
        if let Some(path) = &fields.image {
            self.attach_image(&mut view, path).await?;
        }

        self.save(&mut view).await
    }

    async fn attach_image(&self, view: &mut EditorView, path: &Path) -> Result<()> {
        let selection = read_image(path).await?;
        if !view.select_image(self.api, self.prompt, &selection).await {
            bail!("image was not attached");
        }
        Ok(())
    }

    async fn save(&self, view: &mut EditorView) -> Result<()> {
        if view.submit(self.api, self.prompt).await.is_some() {
            println!("Saved.");
            return Ok(());
        }
        for (field, message) in view.errors().iter() {
            eprintln!("{field}: {message}");
        }
        bail!("product was not saved");
    }

    async fn delete(&self, id: &ProductId, yes: bool) -> Result<()> {
        let mut view = ContentsView::new(self.config.page_size);
        let outcome = if yes {
            view.delete(self.api, &AssumeYes(self.prompt), id).await
        } else {
            view.delete(self.api, self.prompt, id).await
        };

        match outcome {
            DeleteOutcome::Deleted => println!("Deleted {id}."),
            DeleteOutcome::Declined => println!("Nothing deleted."),
            DeleteOutcome::Failed => bail!("could not delete {id}"),
        }
        Ok(())
    }

    async fn upload(&self, path: &Path) -> Result<()> {
        let selection = read_image(path).await?;
        let image = self
            .api
            .upload_image(&selection)
            .await
            .context("upload failed")?;
        println!("key: {}", image.key);
        println!("url: {}", image.url);
        Ok(())
    }

    fn settings(&self) {
        let view = SettingsView::new(self.config, self.tokens);
        println!("API base URL:      {}", view.api_base_url);
        println!("Image base URL:    {}", view.image_base_url);
        println!("Upload company:    {}", view.upload_company_id);
        println!("Page size:         {}", view.page_size);
        println!("Authentication:    {}", view.auth_description());
        println!("Features:");
        for feature in view.features() {
            println!("  - {feature}");
        }
    }

    fn token(&self, session: &SessionStatus) {
        match session {
            SessionStatus::Anonymous => {
                println!("No token configured.");
                return;
            }
            SessionStatus::Valid { expires_at } => match expires_at {
                Some(at) => println!("Token valid until {at}."),
                None => println!("Token valid."),
            },
            SessionStatus::Expired => println!("Token expired."),
            SessionStatus::Unreadable => println!("Token is not a readable JWT."),
        }

        let claims = self
            .tokens
            .token()
            .and_then(|t| TokenClaims::decode_unverified(&t).ok());
        if let Some(claims) = claims {
            println!("subject:   {}", claims.sub.as_deref().unwrap_or("-"));
            println!("user:      {}", claims.user_id.as_deref().unwrap_or("-"));
            println!(
                "role:      {}",
                claims.role.as_ref().map(|r| r.as_str()).unwrap_or("-")
            );
            if let Some(issued) = claims.issued_at() {
                println!("issued:    {issued}");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_image(path: &Path) -> Result<ImageSelection> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageSelection::from_file_name(file_name, bytes))
}

#[cfg(not(target_arch = "wasm32"))]
fn print_row(product: &Product) {
    println!(
        "{:<38} {:<32} {:<12} {:<8} {}",
        product.id,
        truncate(product.display_title(), 32),
        product.category_label(),
        if product.is_active { "active" } else { "inactive" },
        product.created_label()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
