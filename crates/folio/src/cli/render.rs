use console::Style;
use folioapp::model::{Draft, Form, Validity};
use folioapp::notify::{Notice, NoticeKind};
use folioapp::search::{ProjectCard, SearchResult};
use folioapp::validation::ValidationError;
use once_cell::sync::Lazy;

static OK: Lazy<Style> = Lazy::new(|| Style::new().green());
static BAD: Lazy<Style> = Lazy::new(|| Style::new().red());
static DIM: Lazy<Style> = Lazy::new(|| Style::new().dim());
static NAME: Lazy<Style> = Lazy::new(|| Style::new().bold());
static INFO: Lazy<Style> = Lazy::new(|| Style::new().cyan());

pub(super) fn print_notices(notices: &[Notice]) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => println!("{}", OK.apply_to(&notice.message)),
            NoticeKind::Info => println!("{}", INFO.apply_to(&notice.message)),
        }
    }
}

pub(super) fn print_verdict(verdict: &Result<(), ValidationError>) {
    match verdict {
        Ok(()) => println!("{}", OK.apply_to("valid")),
        Err(e) => println!("{} {}", BAD.apply_to("invalid:"), e),
    }
}

pub(super) fn print_form(form: &Form) {
    println!("{} {}", DIM.apply_to("form"), NAME.apply_to(&form.id));
    for field in &form.fields {
        let marker = match field.validity {
            Validity::Valid => OK.apply_to("✓").to_string(),
            Validity::Invalid => BAD.apply_to("✗").to_string(),
            Validity::Unvalidated => DIM.apply_to("·").to_string(),
        };
        let value = if field.is_file() {
            DIM.apply_to("(file)").to_string()
        } else {
            format!("{:?}", field.value)
        };
        match &field.error {
            Some(message) => println!(
                "  {} {} = {}  {}",
                marker,
                NAME.apply_to(&field.name),
                value,
                BAD.apply_to(message)
            ),
            None => println!("  {} {} = {}", marker, NAME.apply_to(&field.name), value),
        }
    }
}

pub(super) fn print_draft(draft: &Draft) {
    println!("{} {}", DIM.apply_to("draft"), NAME.apply_to(draft.key()));
    if draft.values.is_empty() {
        println!("  {}", DIM.apply_to("(empty)"));
    }
    for (name, value) in &draft.values {
        println!("  {} = {:?}", NAME.apply_to(name), value);
    }
}

pub(super) fn print_search(cards: &[ProjectCard], result: &SearchResult) {
    for &i in &result.visible {
        let card = &cards[i];
        match &card.technologies {
            Some(tech) => println!("{}  {}", NAME.apply_to(&card.title), DIM.apply_to(tech)),
            None => println!("{}", NAME.apply_to(&card.title)),
        }
    }
    println!("{}", DIM.apply_to(result.summary()));
}

pub(super) fn print_success(message: &str) {
    println!("{}", OK.apply_to(message));
}

pub(super) fn print_dim(message: &str) {
    println!("{}", DIM.apply_to(message));
}
