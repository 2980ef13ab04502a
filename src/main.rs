// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use bfgm::commands::clean::{CleanArgs, CleanCommand};
use bfgm::commands::install::InstallCommand;
use bfgm::commands::status::StatusCommand;
use bfgm::commands::update::UpdateCommand;
use bfgm::commands::versions::VersionsCommand;
use bfgm::commands::workspace::WorkspaceCommand;
use bfgm::config::new_bfgm_config;
use bfgm::error::{Result, format_error_chain, format_error_with_color, get_exit_code};
use bfgm::logging;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bfgm")]
#[command(author, version, about = "BFG Repo-Cleaner jar manager", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cached BFG jar
    Status {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Download the latest BFG jar if the cached one is missing or outdated
    #[command(visible_alias = "check")]
    Update {
        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Disable progress indicators
        #[arg(long)]
        no_progress: bool,
    },

    /// List BFG versions published to Maven Central
    #[command(visible_alias = "ls")]
    Versions {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Download a specific BFG version
    #[command(visible_alias = "i")]
    Install {
        /// Version to install (e.g., "1.14.0")
        version: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Disable progress indicators
        #[arg(long)]
        no_progress: bool,
    },

    /// Rewrite a repository's history with BFG
    #[command(long_about = "Rewrite a repository's history with BFG

REPO is either a local bare mirror or a remote URL. Remote URLs are cloned
with 'git clone --mirror' into the working directory first.

Examples:
  bfgm clean ./project.git --strip-blobs-bigger-than 100M
  bfgm clean https://github.com/org/project.git --replace-text 'hunter2' --push")]
    Clean {
        /// Mirror path or remote URL
        repo: String,

        /// Text to replace with ***REMOVED*** (repeatable)
        #[arg(long, value_name = "TEXT")]
        replace_text: Vec<String>,

        /// Strip blobs bigger than SIZE (e.g., 100M)
        #[arg(long, value_name = "SIZE")]
        strip_blobs_bigger_than: Option<String>,

        /// BFG jar to use instead of the cached one
        #[arg(long, value_name = "PATH")]
        jar: Option<PathBuf>,

        /// Push the rewritten history with 'git push --mirror'
        #[arg(long)]
        push: bool,

        /// Skip 'git reflog expire' and 'git gc' after cleaning
        #[arg(long)]
        no_gc: bool,
    },

    /// Manage the working directory for mirror clones
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommand,
    },
}

fn setup_logger(cli: &Cli) {
    logging::setup_logger(cli.verbose);
}

fn main() {
    let cli = Cli::parse();

    setup_logger(&cli);

    let config = match new_bfgm_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| match cli.command {
        Commands::Status { json } => {
            let command = StatusCommand::new(&config)?;
            command.execute(json)
        }
        Commands::Update { json, no_progress } => {
            let command = UpdateCommand::new(&config, no_progress || json)?;
            command.execute(json)
        }
        Commands::Versions { json } => {
            let command = VersionsCommand::new(&config)?;
            command.execute(json)
        }
        Commands::Install {
            version,
            json,
            no_progress,
        } => {
            let command = InstallCommand::new(&config, no_progress || json)?;
            command.execute(&version, json)
        }
        Commands::Clean {
            repo,
            replace_text,
            strip_blobs_bigger_than,
            jar,
            push,
            no_gc,
        } => {
            let command = CleanCommand::new(&config)?;
            command.execute(&CleanArgs {
                repo,
                replace_text,
                strip_blobs_bigger_than,
                jar,
                push,
                no_gc,
            })
        }
        Commands::Workspace { command } => command.execute(&config),
    })();

    if let Err(e) = result {
        if std::io::stderr().is_terminal() {
            eprint!("{}", format_error_with_color(&e, true));
        } else {
            eprintln!("{}", format_error_chain(&e));
        }
        std::process::exit(get_exit_code(&e));
    }
}
