#![allow(dead_code)] // not every test binary uses every helper

use std::collections::VecDeque;

use askprops::{Console, Error};

/// Console fed from a prepared script, recording everything shown to the
/// user. Running out of scripted input behaves like closed stdin.
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub output: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I>(inputs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
            prompts: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    pub fn saw_output(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, Error> {
        self.prompts.push(prompt.to_string());
        self.inputs.pop_front().ok_or(Error::NoInput)
    }
}
