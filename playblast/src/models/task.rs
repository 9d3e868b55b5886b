use super::command::Command;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects which worker-side command family runs a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    Blender,
    Ffmpeg,
    FileManagement,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Blender => f.write_str("blender"),
            TaskType::Ffmpeg => f.write_str("ffmpeg"),
            TaskType::FileManagement => f.write_str("file-management"),
        }
    }
}

/*
    Task is the unit the scheduler hands to a worker.
    Dependencies are task names, the scheduler orders by them and not by list position.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique within a job
    pub name: String,

    #[serde(rename = "type")]
    pub task_type: TaskType,

    /// Run in order by the worker
    pub commands: Vec<Command>,

    /// Names of tasks that must finish first
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn new(name: impl Into<String>, task_type: TaskType) -> Self {
        Self {
            name: name.into(),
            task_type,
            commands: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn add_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn add_dependency(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.dependencies.contains(&name) {
            self.dependencies.push(name);
        }
    }

    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|dep| dep == name)
    }
}
