// Command-line and environment configuration

use crate::records::constants::{MAX_CLASSES, MAX_STUDENTS};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "gradebook", version, about = "Terminal academic records manager")]
pub struct Config {
    /// Snapshot file holding classes and students
    #[clap(long, env = "GRADEBOOK_DATA_FILE", default_value = "dados_sistema.bin")]
    pub data_file: PathBuf,

    /// Where log output goes (the terminal is taken by the UI)
    #[clap(long, env = "GRADEBOOK_LOG_FILE", default_value = "gradebook.log")]
    pub log_file: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[clap(long, env = "GRADEBOOK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[clap(long, env = "GRADEBOOK_MAX_CLASSES", default_value_t = MAX_CLASSES)]
    pub max_classes: usize,

    #[clap(long, env = "GRADEBOOK_MAX_STUDENTS", default_value_t = MAX_STUDENTS)]
    pub max_students: usize,

    /// Keep everything in memory; nothing is loaded or saved
    #[clap(long, env = "GRADEBOOK_NO_PERSIST", default_value_t = false)]
    pub no_persist: bool,
}

impl Config {
    /// Reject settings the store cannot be built with
    pub fn validate(&self) -> Result<(), String> {
        if self.max_classes == 0 || self.max_students == 0 {
            return Err(format!(
                "--max-classes and --max-students must be positive (got {} and {})",
                self.max_classes, self.max_students
            ));
        }
        Ok(())
    }
}
