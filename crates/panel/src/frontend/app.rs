//! Leptos application with routing.

use std::future::Future;
use std::sync::Arc;

use leptos::*;
use leptos_router::*;

use content_admin_auth::{TokenStore, init_session, is_token_expired};
use content_admin_client::ApiClient;
use content_admin_core::ProductId;
use content_admin_products::{FormField, PostingPeriodType, Product, ProductForm};

use crate::config::{self, PanelConfig};
use crate::frontend::browser::{LocalStorageTokenStore, WindowPrompt, read_file};
use crate::prompt::Prompt;
use crate::route::Route as Screen;
use crate::views::{ContentsView, DashboardView, EditorView, SettingsView, UPLOAD_FAILED};

/// Shared by every page through context.
#[derive(Clone)]
struct Panel {
    config: PanelConfig,
    api: ApiClient,
}

/// Configuration is baked in at build time from the same variables the CLI reads.
fn build_env(name: &str) -> Option<String> {
    let value = match name {
        config::ENV_API_URL => option_env!("CONTENT_ADMIN_API_URL"),
        config::ENV_TOKEN => option_env!("CONTENT_ADMIN_TOKEN"),
        config::ENV_COMPANY_ID => option_env!("CONTENT_ADMIN_COMPANY_ID"),
        config::ENV_UPLOAD_COMPANY_ID => option_env!("CONTENT_ADMIN_UPLOAD_COMPANY_ID"),
        config::ENV_IMAGE_BASE_URL => option_env!("CONTENT_ADMIN_IMAGE_BASE_URL"),
        config::ENV_PAGE_SIZE => option_env!("CONTENT_ADMIN_PAGE_SIZE"),
        _ => None,
    };
    value.map(str::to_string)
}

impl Panel {
    fn from_build_env() -> Self {
        let config = PanelConfig::from_lookup(build_env).unwrap_or_else(|e| {
            tracing::error!(error = %e, "invalid build configuration; using defaults");
            PanelConfig::default()
        });

        let tokens = LocalStorageTokenStore;
        let now = chrono::Utc::now();
        if config.token.is_some() && tokens.token().is_none() {
            init_session(&tokens, config.token.as_deref(), now);
        } else if is_token_expired(&tokens, now) {
            tracing::warn!("stored bearer token is missing or expired");
        }

        let api = ApiClient::new(config.api_client_config(), Arc::new(tokens));
        Self { config, api }
    }
}

/// Navigation handle for use outside the component body.
///
/// `use_navigate` reads the router from the reactive owner, which async tasks
/// do not carry, so it is resolved once while the page is being built.
fn navigator() -> Callback<String> {
    let navigate = use_navigate();
    Callback::new(move |path: String| navigate(&path, Default::default()))
}

/// Run `action` on a copy of the view, store the result, and follow the
/// returned route. Ignored while another action on the same page is running.
fn run_action<V, F, Fut>(state: RwSignal<V>, busy: RwSignal<bool>, go: Callback<String>, action: F)
where
    V: Clone + 'static,
    F: FnOnce(V) -> Fut + 'static,
    Fut: Future<Output = (V, Option<Screen>)> + 'static,
{
    if busy.get_untracked() {
        return;
    }
    busy.set(true);
    let view = state.get_untracked();

    spawn_local(async move {
        let (view, next) = action(view).await;
        state.set(view);
        busy.set(false);
        if let Some(next) = next {
            go.call(next.path());
        }
    });
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_context(Panel::from_build_env());

    view! {
        <Router>
            <div class="app">
                <header>
                    <h1>"Content Admin"</h1>
                    <Nav/>
                </header>
                <main>
                    <Routes>
                        <Route path="/" view=DashboardPage/>
                        <Route path="/contents" view=ContentsPage/>
                        <Route path="/contents/create" view=CreatePage/>
                        <Route path="/contents/:id" view=EditPage/>
                        <Route path="/settings" view=SettingsPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

#[component]
fn Nav() -> impl IntoView {
    let pathname = use_location().pathname;
    let current = move || Screen::parse(&pathname.get());

    view! {
        <nav>
            <ul>
                {Screen::NAV
                    .iter()
                    .map(|screen| {
                        let target = screen.clone();
                        view! {
                            <li class:active=move || current().is_some_and(|c| c.is_within(&target))>
                                <A href=screen.path()>{screen.title()}</A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

#[component]
fn ProductRow(product: Product, on_delete: Callback<ProductId>) -> impl IntoView {
    let id = ProductId::from_raw(product.id.as_str());
    let href = Screen::EditContent(id.clone()).path();

    view! {
        <tr>
            <td><A href=href>{product.display_title().to_string()}</A></td>
            <td>{product.category_label().to_string()}</td>
            <td>{if product.is_active { "Active" } else { "Inactive" }}</td>
            <td>{product.created_label()}</td>
            <td>
                <button type="button" on:click=move |_| on_delete.call(id.clone())>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

/// Dashboard page component.
#[component]
fn DashboardPage() -> impl IntoView {
    let panel = store_value(expect_context::<Panel>());
    let state = create_rw_signal(DashboardView::new());
    let go = navigator();
    let busy = create_rw_signal(false);

    let api = panel.with_value(|p| p.api.clone());
    run_action(state, busy, go, move |mut view: DashboardView| async move {
        view.load(&api).await;
        (view, None)
    });

    let on_delete = Callback::new(move |id: ProductId| {
        let api = panel.with_value(|p| p.api.clone());
        run_action(state, busy, go, move |mut view: DashboardView| async move {
            view.delete(&api, &WindowPrompt, &id).await;
            (view, None)
        });
    });

    view! {
        <section class="dashboard">
            <h2>"Dashboard"</h2>
            {move || state.with(|v| match v.connected() {
                Some(false) => view! { <p class="status offline">"API unreachable"</p> }.into_view(),
                _ => ().into_view(),
            })}
            {move || state.with(|v| v.error().map(|e| view! { <p class="error">{e.to_string()}</p> }))}
            {move || {
                let summary = state.with(|v| v.summary());
                view! {
                    <div class="cards">
                        <div class="card"><h3>"Total products"</h3><p>{summary.total_products}</p></div>
                        <div class="card"><h3>"Categories"</h3><p>{summary.unique_categories}</p></div>
                        <div class="card"><h3>"Total value"</h3><p>{summary.total_value_label()}</p></div>
                    </div>
                    <h3>"Recent products"</h3>
                    <table>
                        <tbody>
                            {summary
                                .recent
                                .into_iter()
                                .map(|product| view! { <ProductRow product=product on_delete=on_delete/> })
                                .collect_view()}
                        </tbody>
                    </table>
                }
            }}
        </section>
    }
}

/// Content list page component.
#[component]
fn ContentsPage() -> impl IntoView {
    let panel = store_value(expect_context::<Panel>());
    let page_size = panel.with_value(|p| p.config.page_size);
    let state = create_rw_signal(ContentsView::new(page_size));
    let go = navigator();
    let busy = create_rw_signal(false);

    let api = panel.with_value(|p| p.api.clone());
    run_action(state, busy, go, move |mut view: ContentsView| async move {
        view.load(&api).await;
        (view, None)
    });

    let on_delete = Callback::new(move |id: ProductId| {
        let api = panel.with_value(|p| p.api.clone());
        run_action(state, busy, go, move |mut view: ContentsView| async move {
            view.delete(&api, &WindowPrompt, &id).await;
            (view, None)
        });
    });

    view! {
        <section class="contents">
            <div class="toolbar">
                <h2>"Contents"</h2>
                <A href=Screen::CreateContent.path()>"Add product"</A>
            </div>

            {move || state.with(|v| v.error().map(|e| view! { <p class="error">{e.to_string()}</p> }))}

            {move || {
                if busy.get() && state.with(|v| v.products().is_empty()) {
                    return view! { <p class="loading">"Loading..."</p> }.into_view();
                }
                let rows = state.with(|v| v.page_items().to_vec());
                if rows.is_empty() {
                    return view! { <p>"No products yet."</p> }.into_view();
                }
                view! {
                    <table>
                        <thead>
                            <tr>
                                <th>"Product"</th>
                                <th>"Category"</th>
                                <th>"Status"</th>
                                <th>"Created"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows
                                .into_iter()
                                .map(|product| view! { <ProductRow product=product on_delete=on_delete/> })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_view()
            }}

            {move || state.with(|v| v.shows_controls().then(|| {
                let range = v.range();
                let current = v.paginator().current();
                view! {
                    <div class="pagination">
                        {range.map(|r| view! {
                            <span>{format!("Showing {}-{} of {}", r.first, r.last, r.total)}</span>
                        })}
                        <button
                            disabled={!v.has_previous()}
                            on:click=move |_| state.update(|v| { v.previous_page(); })
                        >
                            "Previous"
                        </button>
                        {v.page_numbers()
                            .into_iter()
                            .map(|n| view! {
                                <button
                                    class:current={n == current}
                                    on:click=move |_| state.update(|v| { v.go_to_page(n); })
                                >
                                    {n}
                                </button>
                            })
                            .collect_view()}
                        <button
                            disabled={!v.has_next()}
                            on:click=move |_| state.update(|v| { v.next_page(); })
                        >
                            "Next"
                        </button>
                    </div>
                }
            }))}
        </section>
    }
}

#[component]
fn CreatePage() -> impl IntoView {
    let panel = expect_context::<Panel>();
    let editor = EditorView::create(
        panel.config.company_id.clone(),
        panel.config.image_base_url.clone(),
    );
    view! { <EditorPage editor=editor/> }
}

#[component]
fn EditPage() -> impl IntoView {
    let panel = expect_context::<Panel>();
    let params = use_params_map();
    let id = params.with_untracked(|p| p.get("id").cloned().unwrap_or_default());
    let editor = EditorView::edit(
        ProductId::from_raw(id),
        panel.config.company_id.clone(),
        panel.config.image_base_url.clone(),
    );
    view! { <EditorPage editor=editor/> }
}

fn field_value(form: &ProductForm, field: FormField) -> String {
    match field {
        FormField::Title => form.title.clone(),
        FormField::Content => form.content.clone(),
        FormField::PhoneNumber => form.phone_number.clone(),
        FormField::StartDate => form.start_date.clone(),
        FormField::EndDate => form.end_date.clone(),
        FormField::PostingPeriodType => form.posting_period_type.to_string(),
        FormField::IsActive => form.is_active.to_string(),
    }
}

#[component]
fn TextField(
    state: RwSignal<EditorView>,
    field: FormField,
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
) -> impl IntoView {
    let value = move || state.with(|v| field_value(v.form(), field));
    let on_input = move |ev: ev::Event| state.update(|v| v.set_field(field, &event_target_value(&ev)));

    let input = if kind == "textarea" {
        view! { <textarea id=field.wire_name() prop:value=value on:input=on_input/> }.into_view()
    } else {
        view! { <input type=kind id=field.wire_name() prop:value=value on:input=on_input/> }.into_view()
    };

    view! {
        <div class="form-group">
            <label for=field.wire_name()>{label}</label>
            {input}
            {move || state.with(|v| v.error(field).map(|e| view! { <p class="error">{e.to_string()}</p> }))}
        </div>
    }
}

/// Create/edit form page component.
#[component]
fn EditorPage(editor: EditorView) -> impl IntoView {
    let panel = store_value(expect_context::<Panel>());
    let is_edit = editor.is_edit();
    let state = create_rw_signal(editor);
    let go = navigator();
    let busy = create_rw_signal(false);

    if is_edit {
        let api = panel.with_value(|p| p.api.clone());
        run_action(state, busy, go, move |mut view: EditorView| async move {
            let next = view.load(&api, &WindowPrompt).await;
            (view, next)
        });
    }

    let on_image = move |ev: ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let api = panel.with_value(|p| p.api.clone());
        run_action(state, busy, go, move |mut view: EditorView| async move {
            match read_file(&file).await {
                Ok(selection) => {
                    view.select_image(&api, &WindowPrompt, &selection).await;
                }
                Err(e) => {
                    tracing::error!(error = ?e, "could not read selected file");
                    WindowPrompt.alert(UPLOAD_FAILED);
                }
            }
            (view, None)
        });
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let api = panel.with_value(|p| p.api.clone());
        run_action(state, busy, go, move |mut view: EditorView| async move {
            let next = view.submit(&api, &WindowPrompt).await;
            (view, next)
        });
    };

    let on_delete = move |_: ev::MouseEvent| {
        let api = panel.with_value(|p| p.api.clone());
        run_action(state, busy, go, move |mut view: EditorView| async move {
            let next = view.delete(&api, &WindowPrompt).await;
            (view, next)
        });
    };

    let cancel_href = state.with_untracked(|v| v.cancel().path());

    view! {
        <section class="editor">
            <h2>{if is_edit { "Edit content" } else { "Create content" }}</h2>

            <form on:submit=on_submit>
                <TextField state=state field=FormField::Title label="Title"/>
                <TextField state=state field=FormField::Content label="Content" kind="textarea"/>
                <TextField state=state field=FormField::PhoneNumber label="Phone number" kind="tel"/>
                <TextField state=state field=FormField::StartDate label="Start date" kind="date"/>
                <TextField state=state field=FormField::EndDate label="End date" kind="date"/>

                <div class="form-group">
                    <label for="postingPeriodType">"Posting period"</label>
                    <select
                        id="postingPeriodType"
                        on:change=move |ev| state.update(|v| {
                            v.set_field(FormField::PostingPeriodType, &event_target_value(&ev))
                        })
                    >
                        {PostingPeriodType::SELECTABLE
                            .iter()
                            .map(|period| {
                                let option = period.clone();
                                view! {
                                    <option
                                        value=period.as_str().to_string()
                                        selected=move || state.with(|v| v.form().posting_period_type == option)
                                    >
                                        {period.label().to_string()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || state.with(|v| v.form().is_active)
                            on:change=move |ev| state.update(|v| v.set_active(event_target_checked(&ev)))
                        />
                        " Active"
                    </label>
                </div>

                <div class="form-group">
                    <label for="image">"Image"</label>
                    <input type="file" id="image" accept="image/*" on:change=on_image/>
                    {move || state.with(|v| v.is_uploading().then(|| view! { <p>"Uploading..."</p> }))}
                    {move || state.with(|v| v.image().filter(|img| img.has_url()).map(|img| view! {
                        <img class="preview" src=img.url.clone() alt="Preview"/>
                    }))}
                </div>

                <div class="form-actions">
                    <button type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Saving..." } else { "Save" }}
                    </button>
                    <A href=cancel_href>
                        <button type="button">"Cancel"</button>
                    </A>
                    {is_edit.then(|| view! {
                        <button type="button" class="danger" on:click=on_delete>"Delete"</button>
                    })}
                </div>
            </form>
        </section>
    }
}

/// Settings page component.
#[component]
fn SettingsPage() -> impl IntoView {
    let panel = expect_context::<Panel>();
    let config = panel.config.clone();
    let settings = create_rw_signal(SettingsView::new(&config, &LocalStorageTokenStore));
    let draft = create_rw_signal(String::new());

    let save_token = {
        let config = config.clone();
        move |_: ev::MouseEvent| {
            let token = draft.get_untracked();
            init_session(&LocalStorageTokenStore, Some(&token), chrono::Utc::now());
            draft.set(String::new());
            settings.set(SettingsView::new(&config, &LocalStorageTokenStore));
        }
    };
    let clear_token = move |_: ev::MouseEvent| {
        LocalStorageTokenStore.remove_token();
        settings.set(SettingsView::new(&config, &LocalStorageTokenStore));
    };

    view! {
        <section class="settings">
            <h2>"Settings"</h2>
            {move || {
                let view_model = settings.get();
                view! {
                    <h3>"API configuration"</h3>
                    <p>"Base URL: " <code>{view_model.api_base_url.clone()}</code></p>
                    <p>"Images: " <code>{view_model.image_base_url.clone()}</code></p>
                    <p>"Upload company: " <code>{view_model.upload_company_id.clone()}</code></p>
                    <h3>"Authentication"</h3>
                    <p>{view_model.auth_description()}</p>
                    <h3>"Features"</h3>
                    <ul>
                        {view_model
                            .features()
                            .iter()
                            .map(|f| view! { <li>{*f}</li> })
                            .collect_view()}
                    </ul>
                }
            }}
            <div class="form-group">
                <label for="token">"Bearer token"</label>
                <input
                    type="password"
                    id="token"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button type="button" on:click=save_token>"Save token"</button>
                <button type="button" on:click=clear_token>"Clear token"</button>
            </div>
        </section>
    }
}
