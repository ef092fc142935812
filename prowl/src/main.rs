use commands::command_argument_builder;
use prowl::handlers;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    if matches.get_flag("no-color") {
        colored::control::set_override(false);
    }

    // Show banner unless --quiet flag is set
    if !matches.get_flag("quiet") {
        handlers::print_banner();
    }

    handlers::handle_scan(&matches).await;
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
