use super::{error::CompileError, task::Task, task::TaskType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All tasks of one job plus the dependency edges between them.
///
/// A task can only depend on tasks added before it, which keeps the graph
/// acyclic without a separate cycle check. Insertion order is kept for
/// display only, consumers schedule through [`TaskGraph::levels`] or
/// [`TaskGraph::topological_order`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Task>", into = "Vec<Task>")]
pub struct TaskGraph {
    tasks: Vec<Task>,
    // task name -> (index into tasks, depth)
    index: HashMap<String, (usize, usize)>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) -> Result<(), CompileError> {
        if self.index.contains_key(&task.name) {
            return Err(CompileError::DuplicateTask(task.name));
        }

        let mut depth = 0;
        for dependency in &task.dependencies {
            match self.index.get(dependency) {
                Some((_, dep_depth)) => depth = depth.max(dep_depth + 1),
                None => {
                    return Err(CompileError::UnknownDependency {
                        task: task.name.clone(),
                        dependency: dependency.clone(),
                    })
                }
            }
        }

        self.index
            .insert(task.name.clone(), (self.tasks.len(), depth));
        self.tasks.push(task);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.index.get(name).map(|(i, _)| &self.tasks[*i])
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn of_type(&self, task_type: TaskType) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.task_type == task_type)
    }

    /// Tasks that list `name` as a direct dependency.
    pub fn dependents(&self, name: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.depends_on(name)).collect()
    }

    /// Tasks grouped by depth. Everything in one level can run in parallel once
    /// the previous level is done.
    pub fn levels(&self) -> Vec<Vec<&str>> {
        let mut levels: Vec<Vec<&str>> = Vec::new();
        for task in &self.tasks {
            let depth = self.index[&task.name].1;
            if levels.len() <= depth {
                levels.resize_with(depth + 1, Vec::new);
            }
            levels[depth].push(task.name.as_str());
        }
        levels
    }

    pub fn topological_order(&self) -> Vec<&str> {
        self.levels().into_iter().flatten().collect()
    }
}

impl TryFrom<Vec<Task>> for TaskGraph {
    type Error = CompileError;

    fn try_from(tasks: Vec<Task>) -> Result<Self, Self::Error> {
        let mut graph = TaskGraph::new();
        for task in tasks {
            graph.add(task)?;
        }
        Ok(graph)
    }
}

impl From<TaskGraph> for Vec<Task> {
    fn from(graph: TaskGraph) -> Self {
        graph.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, task_type: TaskType, deps: &[&str]) -> Task {
        let mut task = Task::new(name, task_type);
        for dep in deps {
            task.add_dependency(*dep);
        }
        task
    }

    fn sample() -> TaskGraph {
        let mut graph = TaskGraph::new();
        graph.add(task("render-1-5", TaskType::Blender, &[])).unwrap();
        graph.add(task("render-6-10", TaskType::Blender, &[])).unwrap();
        graph
            .add(task(
                "preview-video",
                TaskType::Ffmpeg,
                &["render-1-5", "render-6-10"],
            ))
            .unwrap();
        graph
            .add(task("cleanup-frames", TaskType::FileManagement, &["preview-video"]))
            .unwrap();
        graph
    }

    #[test]
    fn levels_follow_dependencies() {
        let graph = sample();
        assert_eq!(
            graph.levels(),
            vec![
                vec!["render-1-5", "render-6-10"],
                vec!["preview-video"],
                vec!["cleanup-frames"],
            ]
        );
        assert_eq!(graph.topological_order().last(), Some(&"cleanup-frames"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut graph = sample();
        let result = graph.add(task("render-1-5", TaskType::Blender, &[]));
        assert_eq!(result, Err(CompileError::DuplicateTask("render-1-5".to_owned())));
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn rejects_forward_references() {
        let mut graph = TaskGraph::new();
        let result = graph.add(task("preview-video", TaskType::Ffmpeg, &["render-1"]));
        assert!(matches!(result, Err(CompileError::UnknownDependency { .. })));
        assert!(graph.is_empty());
    }

    #[test]
    fn dependents_lists_direct_children() {
        let graph = sample();
        let names: Vec<&str> = graph
            .dependents("render-1-5")
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["preview-video"]);
        assert!(graph.dependents("cleanup-frames").is_empty());
    }

    #[test]
    fn deserializing_revalidates_the_graph() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: TaskGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());

        let broken = r#"[{"name": "a", "type": "ffmpeg", "commands": [], "dependencies": ["b"]}]"#;
        assert!(serde_json::from_str::<TaskGraph>(broken).is_err());
    }
}
