use clap::Args;
use driving_school::registration::{
    CourseCatalog, CourseEntry, CourseKey, CourseTotal, PricingBasis, SessionCount,
};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Course code (teen-license, driving-lessons, driver-improvement, road-test)
    #[arg(long, value_parser = parse_course)]
    pub(crate) course: CourseKey,
    /// Number of sessions for per-session courses (1, 5, or 10)
    #[arg(long, default_value = "1", value_parser = parse_sessions)]
    pub(crate) sessions: SessionCount,
}

fn parse_course(raw: &str) -> Result<CourseKey, String> {
    CourseKey::from_code_lenient(raw).ok_or_else(|| {
        let known: Vec<_> = CourseKey::ordered().iter().map(|key| key.code()).collect();
        format!("unknown course '{raw}' (expected one of {})", known.join(", "))
    })
}

fn parse_sessions(raw: &str) -> Result<SessionCount, String> {
    let count = raw
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("failed to parse '{raw}' as a session count ({err})"))?;
    SessionCount::try_from(count)
}

pub(crate) fn run_catalog() {
    let catalog = CourseCatalog::standard();
    println!("Course catalog");
    for entry in catalog.entries() {
        println!("{}", catalog_line(entry));
    }
}

pub(crate) fn run_quote(args: QuoteArgs) {
    let catalog = CourseCatalog::standard();
    let QuoteArgs { course, sessions } = args;
    let total = catalog.compute_total(Some(course), sessions);

    let entry = catalog.get(course);
    let name = entry
        .map(|entry| entry.name.as_str())
        .unwrap_or(course.code());
    let sessions = entry
        .filter(|entry| entry.is_per_session())
        .map(|_| sessions);
    println!("{}", quote_line(name, sessions, total));
    println!("  Button: {}", total.submit_label());
}

fn catalog_line(entry: &CourseEntry) -> String {
    let price = match entry.unit_price {
        Some(price) => format!("${price}"),
        None => "Contact Us".to_string(),
    };
    let basis = match entry.pricing {
        PricingBasis::Flat => "",
        PricingBasis::PerSession => " per session",
    };
    format!(
        "  {:<20} {:<32} {}{} ({})",
        entry.key.code(),
        entry.name,
        price,
        basis,
        entry.description
    )
}

fn quote_line(name: &str, sessions: Option<SessionCount>, total: CourseTotal) -> String {
    match (sessions, total) {
        (_, CourseTotal::NoCourse) => format!("{name}: no total"),
        (Some(sessions), CourseTotal::Amount(_)) => {
            format!("{name} x {}: Total {total}", sessions.label())
        }
        _ => format!("{name}: Total {total}"),
    }
}
