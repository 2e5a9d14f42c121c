use super::Builtin;
use crate::process::bg::Bg;
use crate::process::cd::Cd;
use crate::process::exit::Exit;
use crate::process::fg::Fg;
use crate::process::help::Help;
use crate::process::jobs::Jobs;
use crate::process::pwd::Pwd;
use crate::process::wait::Wait;

pub struct BuiltinEntry {
    pub name: &'static str,
    pub description: &'static str,
    handler: Box<dyn Builtin>,
}

impl BuiltinEntry {
    pub fn handler(&self) -> &dyn Builtin {
        self.handler.as_ref()
    }
}

/// Ordered registry of builtins. Names are unique; registering a name again
/// replaces the earlier handler in place.
pub struct BuiltinMap {
    entries: Vec<BuiltinEntry>,
}

impl BuiltinMap {
    pub fn new() -> Self {
        BuiltinMap {
            entries: Vec::new(),
        }
    }

    /// Registry holding every shell builtin.
    pub fn with_defaults() -> Self {
        let mut builtin = BuiltinMap::new();
        builtin.populate_func_map();
        builtin
    }

    pub fn populate_func_map(&mut self) {
        // If builtin map is not empty abort inital population
        if !self.is_empty() {
            return;
        }

        self.add("help", "show this help menu", Box::new(Help));
        self.add("exit", "exit the command shell", Box::new(Exit));
        self.add("pwd", "display the working directory", Box::new(Pwd));
        self.add("cd", "change the working directory", Box::new(Cd));
        self.add("wait", "wait for every background job to finish", Box::new(Wait));
        self.add("fg", "move a job to the foreground", Box::new(Fg));
        self.add("bg", "resume a job in the background", Box::new(Bg));
        self.add("jobs", "list tracked jobs", Box::new(Jobs));
    }

    pub fn add(&mut self, name: &'static str, description: &'static str, handler: Box<dyn Builtin>) {
        let entry = BuiltinEntry {
            name,
            description,
            handler,
        };
        match self.entries.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn Builtin> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(BuiltinEntry::handler)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = &BuiltinEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BuiltinMap {
    fn default() -> Self {
        Self::with_defaults()
    }
}
