// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use restartctl::types::OperatorType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "restartctl")]
#[command(about = "Restart operator deployments on a Kubernetes cluster")]
#[command(version)]
pub struct Cli {
    /// Path to the config file (default: discovered in the working directory, then $HOME)
    #[arg(long, global = true, env = "RESTARTCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print prompts, warnings and the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new restartctl.yml configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Restart all deployments of an operator
    ///
    /// Deletes the pods of the lifecycle-managed deployments, then triggers a
    /// rollout restart of the directly-owned deployments, waiting for each
    /// rollout to complete.
    Restart {
        /// Name of the cluster (as defined in the config)
        #[arg(short, long = "target-cluster")]
        target_cluster: String,

        /// Operator to restart (required)
        #[arg(value_name = "OPERATOR_TYPE")]
        operator: Option<OperatorType>,
    },

    /// Print the logs of a pod in the operator namespace
    Logs {
        /// Name of the cluster (as defined in the config)
        #[arg(short, long = "target-cluster")]
        target_cluster: String,

        /// Pod name
        pod: String,

        /// Container name (required for multi-container pods)
        #[arg(short, long)]
        container: Option<String>,

        /// Follow log output
        #[arg(short, long)]
        follow: bool,

        /// Number of lines to show from the end
        #[arg(long)]
        tail: Option<i64>,

        /// Prefix each line with its timestamp
        #[arg(long)]
        timestamps: bool,
    },
}
