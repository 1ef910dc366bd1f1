//! A fake driver for tests: it "compiles" by checking for a `main` function and balanced braces,
//! and "links" by matching each stage's inputs against the outputs of the stage before it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gl::types::GLuint;

use crate::driver::ShaderDriver;
use crate::stage::StageKind;

pub const VERTEX: &str = "#version 330 core
in vec3 position;
in vec4 color;
out vec4 v_color;
void main() {
    v_color = color;
    gl_Position = vec4(position, 1.0);
}
";

pub const FRAGMENT: &str = "#version 330 core
in vec4 v_color;
out vec4 frag_color;
void main() {
    frag_color = v_color;
}
";

struct Shader {
    kind: StageKind,
    source: String,
}

#[derive(Default)]
struct Program {
    attached: Vec<GLuint>,
    attributes: Vec<String>,
}

#[derive(Default)]
struct State {
    next_id: GLuint,
    shaders: HashMap<GLuint, Shader>,
    programs: HashMap<GLuint, Program>,
    compiled: Vec<StageKind>,
    programs_created: usize,
    info_log_queries: usize,
    refuse_shaders: bool,
    refuse_programs: bool,
    silent_logs: bool,
    bound: GLuint,
}

impl State {
    fn next_id(&mut self) -> GLuint {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct MockDriver {
    state: Rc<RefCell<State>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refuse_shader_creation(&self) {
        self.state.borrow_mut().refuse_shaders = true;
    }

    pub fn refuse_program_creation(&self) {
        self.state.borrow_mut().refuse_programs = true;
    }

    /// Makes both info-log queries return nothing, as some drivers do.
    pub fn silence_info_logs(&self) {
        self.state.borrow_mut().silent_logs = true;
    }

    /// Stage kinds passed to `compile_shader`, in call order.
    pub fn compiled(&self) -> Vec<StageKind> {
        self.state.borrow().compiled.clone()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> Vec<GLuint> {
        let mut ids: Vec<_> = self.state.borrow().programs.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn programs_created(&self) -> usize {
        self.state.borrow().programs_created
    }

    pub fn attached(&self, program: GLuint) -> Vec<GLuint> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.attached.clone())
            .unwrap_or_default()
    }

    /// Number of shader and program info logs fetched.
    pub fn info_log_queries(&self) -> usize {
        self.state.borrow().info_log_queries
    }

    pub fn bound_program(&self) -> GLuint {
        self.state.borrow().bound
    }
}

/// Returns a compiler-style message for the first problem found, if any.
fn check_syntax(source: &str) -> Option<String> {
    let mut depth = 0i32;
    for (n, line) in source.lines().enumerate() {
        for c in line.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return Some(format!("0:{}(1): error: syntax error, unexpected '}}'", n + 1));
            }
        }
    }

    if depth != 0 {
        let last = source.lines().count().max(1);
        return Some(format!("0:{}(1): error: syntax error, unexpected end of file", last));
    }

    if !source.contains("void main") {
        return Some("error: no definition of function 'main'".to_string());
    }

    None
}

/// Names declared with the given storage qualifier (`in` or `out`), ignoring layout-only lines.
fn interface(source: &str, qualifier: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .map(|line| {
            if line.starts_with("layout") {
                line.splitn(2, ')').nth(1).unwrap_or("").trim()
            } else {
                line
            }
        })
        .filter(|line| line.starts_with(qualifier) && line[qualifier.len()..].starts_with(' '))
        .filter_map(|line| line.trim_end_matches(';').split_whitespace().last())
        .map(|name| name.split('[').next().unwrap_or(name).to_string())
        .collect()
}

impl ShaderDriver for MockDriver {
    fn create_shader(&self, kind: StageKind) -> GLuint {
        let mut state = self.state.borrow_mut();
        if state.refuse_shaders {
            return 0;
        }

        let id = state.next_id();
        state.shaders.insert(id, Shader { kind, source: String::new() });
        id
    }

    fn compile_shader(&self, shader: GLuint, source: &str) -> bool {
        let mut state = self.state.borrow_mut();
        let kind = match state.shaders.get_mut(&shader) {
            Some(s) => {
                s.source = source.to_string();
                s.kind
            }
            None => return false,
        };
        state.compiled.push(kind);

        check_syntax(source).is_none()
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let mut state = self.state.borrow_mut();
        state.info_log_queries += 1;
        if state.silent_logs {
            return String::new();
        }

        state
            .shaders
            .get(&shader)
            .and_then(|s| check_syntax(&s.source))
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: GLuint) {
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> GLuint {
        let mut state = self.state.borrow_mut();
        if state.refuse_programs {
            return 0;
        }

        let id = state.next_id();
        state.programs.insert(id, Program::default());
        state.programs_created += 1;
        id
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        let mut state = self.state.borrow_mut();
        if let Some(p) = state.programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        let mut state = self.state.borrow_mut();
        if let Some(p) = state.programs.get_mut(&program) {
            p.attached.retain(|&s| s != shader);
        }
    }

    fn link_program(&self, program: GLuint) -> bool {
        let mut state = self.state.borrow_mut();
        let attributes = match link_errors(&state, program) {
            Ok(attributes) => attributes,
            Err(_) => return false,
        };

        if let Some(p) = state.programs.get_mut(&program) {
            p.attributes = attributes;
        }
        true
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let mut state = self.state.borrow_mut();
        state.info_log_queries += 1;
        if state.silent_logs {
            return String::new();
        }

        link_errors(&state, program).err().unwrap_or_default()
    }

    fn delete_program(&self, program: GLuint) {
        self.state.borrow_mut().programs.remove(&program);
    }

    fn use_program(&self, program: GLuint) {
        self.state.borrow_mut().bound = program;
    }

    fn attrib_location(&self, program: GLuint, name: &str) -> Option<GLuint> {
        let state = self.state.borrow();
        let p = state.programs.get(&program)?;

        p.attributes.iter().position(|a| a == name).map(|i| i as GLuint)
    }
}

/// Checks every stage's inputs against the outputs of the stage before it. On success returns the
/// vertex stage's attributes in declaration order.
fn link_errors(state: &State, program: GLuint) -> Result<Vec<String>, String> {
    let p = state
        .programs
        .get(&program)
        .ok_or_else(|| format!("error: {} is not a program", program))?;

    let mut stages: Vec<&Shader> = p.attached.iter().filter_map(|id| state.shaders.get(id)).collect();
    stages.sort_by_key(|s| s.kind);

    if stages.is_empty() {
        return Err("error: no shaders attached to program".to_string());
    }

    for pair in stages.windows(2) {
        let (producer, consumer) = (pair[0], pair[1]);
        let outputs = interface(&producer.source, "out");

        for input in interface(&consumer.source, "in") {
            if !outputs.contains(&input) {
                return Err(format!(
                    "error: {} input '{}' has no matching output in the previous stage",
                    consumer.kind, input
                ));
            }
        }
    }

    Ok(stages
        .iter()
        .find(|s| s.kind == StageKind::Vertex)
        .map(|s| interface(&s.source, "in"))
        .unwrap_or_default())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stage_interfaces_are_read_from_declarations() {
        assert_eq!(interface(VERTEX, "in"), vec!["position", "color"]);
        assert_eq!(interface(VERTEX, "out"), vec!["v_color"]);
        assert_eq!(interface("layout(vertices = 4) out;\nout vec4 tc_color[];\n", "out"), vec!["tc_color"]);
        assert_eq!(check_syntax("void main() {"), Some("0:1(1): error: syntax error, unexpected end of file".to_string()));
    }
}
