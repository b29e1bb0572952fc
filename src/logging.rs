//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the built-in directives; `LOG_FORMAT=json`
//! switches to structured JSON lines.

use tracing_subscriber::{filter::Directive, EnvFilter};

const DEFAULT_DIRECTIVES: [&str; 3] = ["image_resize=debug", "aws_sdk=warn", "aws_smithy=warn"];

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn default_filter() -> EnvFilter {
    DEFAULT_DIRECTIVES
        .iter()
        .filter_map(|d| d.parse::<Directive>().ok())
        .fold(EnvFilter::new("info"), EnvFilter::add_directive)
}
