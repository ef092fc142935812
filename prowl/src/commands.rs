use crate::CLAP_STYLING;
use clap::arg;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("prowl")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("prowl")
        .styles(CLAP_STYLING)
        .about(
            "Maps the reachable paths of a single target site by following links, \
            scripts and form targets.",
        )
        .arg(
            arg!([TARGET])
                .required(true)
                .help("The URL or host to crawl (http:// is assumed when no scheme is given)"),
        )
        .arg(
            arg!(--"max-depth" <N>)
                .required(false)
                .help(
                    "Maximum number of link hops to expand from the seed path. \
                    Values that are not non-negative integers are ignored, leaving \
                    the depth unbounded.",
                ),
        )
        .arg(
            arg!(--"export-suspicious" <FILE>)
                .required(false)
                .help("Write suspicious findings to a CSV file (origin, raw value, reason)"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(arg!(--"no-color" "Disable colored output").required(false))
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
}
