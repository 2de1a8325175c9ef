//! Explicit path construction for experiment inputs and outputs.
//!
//! All file addressing flows through this type; nothing in the crate
//! changes the process working directory.

use std::path::{Path, PathBuf};

/// Path layout for one experiment run.
#[derive(Debug, Clone)]
pub struct ExperimentPaths {
    inputs: PathBuf,
    outputs: PathBuf,
}

impl ExperimentPaths {
    pub fn new(inputs: PathBuf, outputs: PathBuf) -> Self {
        Self { inputs, outputs }
    }

    pub fn inputs_root(&self) -> &Path {
        &self.inputs
    }

    pub fn outputs_root(&self) -> &Path {
        &self.outputs
    }

    pub fn config_path(&self) -> PathBuf {
        self.inputs.join("config.txt")
    }

    /// Resolve a config-named input file against the inputs directory.
    pub fn input_file(&self, name: &Path) -> PathBuf {
        self.inputs.join(name)
    }

    pub fn list_dir(&self, list_no: u32) -> PathBuf {
        self.outputs.join(format!("List-{list_no}"))
    }

    pub fn document_path(&self, ex_name: &str, list_no: u32) -> PathBuf {
        self.list_dir(list_no)
            .join(format!("{ex_name}-List-{list_no}.tex"))
    }

    pub fn order_log_path(&self, ex_name: &str, list_no: u32) -> PathBuf {
        self.list_dir(list_no)
            .join(format!("{ex_name}-List-{list_no}-Order.txt"))
    }

    pub fn report_path(&self) -> PathBuf {
        self.outputs.join("run_report.json")
    }
}
