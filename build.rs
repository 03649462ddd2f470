// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: settings file path
fn settings_path_arg() -> Arg {
    Arg::new("path")
        .value_name("PATH")
        .help("Settings file path (default: ~/lunx_settings.json)")
}

fn build_cli() -> Command {
    Command::new("lunx")
        .version(env!("CARGO_PKG_VERSION"))
        .author("lunx contributors")
        .about("Plan a Windows to Linux migration and generate the migration script")
        .subcommand_required(false)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Enable debug logging (overridden by RUST_LOG)"),
        )
        .subcommand(
            Command::new("suggest")
                .about("Suggest Linux packages for Windows application names")
                .arg(
                    Arg::new("names")
                        .required(true)
                        .num_args(1..)
                        .help("Application display names"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print suggestions as JSON"),
                ),
        )
        .subcommand(
            Command::new("scan")
                .about("Enumerate profile folders and installed applications")
                .arg(Arg::new("user").short('u').long("user").help("Windows user name"))
                .arg(
                    Arg::new("profile")
                        .short('p')
                        .long("profile")
                        .help("Profile directory to scan instead"),
                )
                .arg(
                    Arg::new("apps")
                        .short('a')
                        .long("apps")
                        .help("JSON export of uninstall registry entries"),
                )
                .arg(
                    Arg::new("max_items")
                        .long("max-items")
                        .help("Stop each enumeration after this many records"),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Settings file management")
                .subcommand(
                    Command::new("init")
                        .about("Write a settings file with default values")
                        .arg(settings_path_arg())
                        .arg(
                            Arg::new("force")
                                .short('f')
                                .long("force")
                                .action(ArgAction::SetTrue)
                                .help("Overwrite an existing file"),
                        ),
                )
                .subcommand(
                    Command::new("show")
                        .about("Print the effective configuration of a settings file")
                        .arg(settings_path_arg()),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate the migration script (and archive, if enabled)")
                .arg(
                    Arg::new("settings")
                        .short('s')
                        .long("settings")
                        .required(true)
                        .help("Settings file to read"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Script output path (default: ~/migrate_to_linux.sh)"),
                )
                .arg(
                    Arg::new("archive_output")
                        .long("archive-output")
                        .help("Archive output path (default: next to the script)"),
                )
                .arg(
                    Arg::new("profile")
                        .short('p')
                        .long("profile")
                        .help("Source profile directory"),
                )
                .arg(
                    Arg::new("skip_archive")
                        .long("skip-archive")
                        .action(ArgAction::SetTrue)
                        .help("Do not create the archive, only reference it"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("lunx.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
