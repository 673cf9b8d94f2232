use super::render::{
    print_dim, print_draft, print_form, print_notices, print_search, print_success,
    print_verdict,
};
use super::setup::{Cli, Commands, DraftCommands, KindArg};
use crate::clipboard::copy_to_clipboard;
use anyhow::{bail, Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use folioapp::api::FolioApi;
use folioapp::config::FolioConfig;
use folioapp::form::{FormView, SubmitOutcome};
use folioapp::model::{Field, Form};
use folioapp::search::ProjectCard;
use folioapp::store::FsBackend;
use folioapp::upload::mime_from_extension;
use folioapp::validation::validate;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: FolioApi<FsBackend>,
}

/// Reflects form events on the terminal.
#[derive(Default)]
struct TerminalView {
    focused: Option<String>,
}

impl FormView for TerminalView {
    fn mark_valid(&mut self, field: &str) {
        tracing::debug!(field, "marked valid");
    }

    fn mark_invalid(&mut self, field: &str, message: &str) {
        tracing::debug!(field, message, "marked invalid");
    }

    fn focus(&mut self, field: &str) {
        self.focused = Some(field.to_string());
    }

    fn disable_submit(&mut self) {
        tracing::debug!("submit disabled");
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // `check` needs no storage
    if let Commands::Check {
        kind,
        required,
        value,
    } = &cli.command
    {
        return handle_check(*kind, *required, value);
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Check { .. } => Ok(()),
        Commands::Submit { form, values } => handle_submit(&mut ctx, &form, &values),
        Commands::Fill { form, values } => handle_fill(&mut ctx, &form, &values),
        Commands::Draft(cmd) => match cmd {
            DraftCommands::Show { form_id } => handle_draft_show(&ctx, &form_id),
            DraftCommands::List => handle_draft_list(&ctx),
            DraftCommands::Clear { form_id } => handle_draft_clear(&mut ctx, &form_id),
        },
        Commands::Theme { toggle } => handle_theme(&mut ctx, toggle),
        Commands::Search { projects, term } => handle_search(&ctx, &projects, &term),
        Commands::Upload { file, mime } => handle_upload(&ctx, &file, mime),
        Commands::Copy { text } => handle_copy(&mut ctx, &text),
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dirs = ProjectDirs::from("com", "folio", "folio");
    let config = FolioConfig::load(dirs.as_ref().map(|d| d.config_dir()))?;

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .or_else(|| dirs.as_ref().map(|d| d.data_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(".folio"));
    tracing::debug!(data_dir = %data_dir.display(), "using store");

    Ok(AppContext {
        api: FolioApi::new(FsBackend::new(data_dir), &config),
    })
}

fn handle_check(kind: KindArg, required: bool, value: &str) -> Result<()> {
    let mut field = Field::new("value", kind.into()).with_value(value);
    field.required = required;
    let verdict = validate(&field).map(|_| ());
    print_verdict(&verdict);
    if verdict.is_err() {
        bail!("Validation failed");
    }
    Ok(())
}

fn read_form(path: &Path) -> Result<Form> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form {}", path.display()))?;
    let form = serde_json::from_str(&content)
        .with_context(|| format!("Invalid form description in {}", path.display()))?;
    Ok(form)
}

fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("Expected NAME=VALUE, got '{}'", raw),
    }
}

/// Registers the form and types each assignment into it, like a user would.
fn type_values(
    ctx: &mut AppContext,
    form_path: &Path,
    values: &[String],
    view: &mut TerminalView,
) -> Result<String> {
    let form = read_form(form_path)?;
    let form_id = form.id.clone();
    let restored = ctx.api.register_form(form);
    if restored > 0 {
        tracing::debug!(restored, "fields restored from draft");
    }

    for raw in values {
        let (name, value) = parse_assignment(raw)?;
        ctx.api.field_input(&form_id, name, value, view)?;
        ctx.api.field_blur(&form_id, name, view)?;
    }
    Ok(form_id)
}

/// Sleeps until every pending autosave has fired.
fn wait_for_autosave(ctx: &mut AppContext) {
    while let Some(deadline) = ctx.api.next_deadline() {
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        ctx.api.tick();
    }
}

fn handle_submit(ctx: &mut AppContext, form_path: &Path, values: &[String]) -> Result<()> {
    let mut view = TerminalView::default();
    let form_id = type_values(ctx, form_path, values, &mut view)?;
    let outcome = ctx.api.submit(&form_id, &mut view)?;

    match outcome {
        SubmitOutcome::Proceed => {
            // Leaving the page drops whatever autosave was still pending.
            ctx.api.teardown();
            print_notices(&ctx.api.take_notices());
            print_success("Submitted");
            Ok(())
        }
        SubmitOutcome::Cancelled { failures } => {
            // The user stays on the page, so the typed values still autosave.
            wait_for_autosave(ctx);
            print_notices(&ctx.api.take_notices());
            print_form(ctx.api.form(&form_id)?);
            if let Some(first) = &view.focused {
                print_dim(&format!("focus: {}", first));
            }
            bail!("Submission cancelled: {} invalid field(s)", failures.len())
        }
        SubmitOutcome::Ignored => Ok(()),
    }
}

fn handle_fill(ctx: &mut AppContext, form_path: &Path, values: &[String]) -> Result<()> {
    let mut view = TerminalView::default();
    let form_id = type_values(ctx, form_path, values, &mut view)?;
    wait_for_autosave(ctx);

    print_notices(&ctx.api.take_notices());
    print_form(ctx.api.form(&form_id)?);
    Ok(())
}

fn handle_draft_show(ctx: &AppContext, form_id: &str) -> Result<()> {
    match ctx.api.stored_draft(form_id) {
        Some(draft) => print_draft(&draft),
        None => print_dim(&format!("No draft for '{}'", form_id)),
    }
    Ok(())
}

fn handle_draft_list(ctx: &AppContext) -> Result<()> {
    let ids = ctx.api.stored_draft_ids()?;
    if ids.is_empty() {
        print_dim("No drafts.");
    }
    for id in ids {
        println!("{}", id);
    }
    Ok(())
}

fn handle_draft_clear(ctx: &mut AppContext, form_id: &str) -> Result<()> {
    ctx.api.discard_draft(form_id)?;
    print_success(&format!("Draft cleared: {}", form_id));
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, toggle: bool) -> Result<()> {
    let theme = if toggle {
        ctx.api.toggle_theme()
    } else {
        ctx.api.theme()
    };
    println!("{}", theme);
    Ok(())
}

fn handle_search(ctx: &AppContext, path: &Path, term: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read projects {}", path.display()))?;
    let cards: Vec<ProjectCard> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid project list in {}", path.display()))?;
    let result = ctx.api.search_projects(&cards, term);
    print_search(&cards, &result);
    Ok(())
}

fn handle_upload(ctx: &AppContext, path: &Path, mime: Option<String>) -> Result<()> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let mime = mime.unwrap_or_else(|| mime_from_extension(name).to_string());

    ctx.api.check_upload(size, &mime)?;
    print_success(&format!("{} ({} bytes, {}) can be uploaded", name, size, mime));
    Ok(())
}

fn handle_copy(ctx: &mut AppContext, text: &str) -> Result<()> {
    copy_to_clipboard(text)?;
    ctx.api.link_copied();
    print_notices(&ctx.api.take_notices());
    Ok(())
}
