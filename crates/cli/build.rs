use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let format_arg = || {
        clap::arg!(-f --format <FORMAT> "Output format (text, json)")
            .value_name("FORMAT")
            .default_value("text")
            .value_parser(["text", "json"])
    };
    let hints_arg = || {
        clap::arg!(--hints <FILE> "JSON file of extra domain hints")
            .value_name("FILE")
            .value_parser(clap::value_parser!(std::path::PathBuf))
    };

    let mut cmd = clap::Command::new("readlater")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Link previews for your reading list")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand_required(true)
        .subcommand(
            clap::Command::new("fetch")
                .about("Fetch a URL through the relay list and print its preview")
                .arg(clap::arg!(<URL> "Page to preview"))
                .arg(format_arg())
                .arg(clap::arg!(--"timeout-ms" <MS> "Per-relay timeout in milliseconds").default_value("2500"))
                .arg(
                    clap::arg!(--proxy <TEMPLATE> "Relay URL template containing {url}")
                        .value_name("TEMPLATE")
                        .action(clap::ArgAction::Append),
                )
                .arg(hints_arg()),
        )
        .subcommand(
            clap::Command::new("inspect")
                .about("Extract a preview from local HTML without touching the network")
                .arg(clap::arg!(<INPUT> "Local HTML file, or '-' for stdin"))
                .arg(clap::arg!(--url <PAGE_URL> "URL the HTML was served from").required(true))
                .arg(format_arg())
                .arg(hints_arg()),
        )
        .subcommand(
            clap::Command::new("tags")
                .about("Suggest tags for a URL")
                .arg(clap::arg!(<URL> "Link to tag"))
                .arg(
                    clap::arg!(--existing <TAG> "Tag the list already has")
                        .value_name("TAG")
                        .action(clap::ArgAction::Append),
                ),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "readlater", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "readlater", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "readlater", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "readlater", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
