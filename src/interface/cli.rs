use std::ffi::OsString;
use std::path::PathBuf;

use clap::{App, ArgMatches, ErrorKind};
use log::info;
use shaders::StageKind;

use crate::error::AppError;
use crate::graphics::version::GlVersion;

/// Settings for one run, taken from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub shader_dir: PathBuf,
    /// Source file for each requested stage, relative to `shader_dir`.
    pub stages: Vec<(StageKind, String)>,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub gl_version: GlVersion,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, AppError> {
        let value = |name: &str| matches.value_of(name).unwrap_or_default().to_string();

        let mut stages = vec![
            (StageKind::Vertex, value("vert")),
            (StageKind::Fragment, value("frag")),
        ];

        if matches.is_present("tessellate") {
            stages.push((StageKind::TessellationControl, default_name(StageKind::TessellationControl)));
            stages.push((StageKind::TessellationEvaluation, default_name(StageKind::TessellationEvaluation)));
        }

        for &(arg, kind) in &[
            ("tesc", StageKind::TessellationControl),
            ("tese", StageKind::TessellationEvaluation),
            ("geom", StageKind::Geometry),
        ] {
            if let Some(name) = matches.value_of(arg) {
                stages.push((kind, name.to_string()));
            }
        }
        stages.sort_by_key(|&(kind, _)| kind);

        let width = value_t!(matches, "width", u32).map_err(|e| AppError::Config(e.message))?;
        let height = value_t!(matches, "height", u32).map_err(|e| AppError::Config(e.message))?;
        if width == 0 || height == 0 {
            return Err(AppError::Config(format!("window size {}x{} is empty", width, height)));
        }

        let gl_version = value("gl-version").parse().map_err(AppError::Config)?;

        Ok(Self {
            shader_dir: PathBuf::from(value("shader-dir")),
            stages,
            width,
            height,
            title: value("title"),
            gl_version,
        })
    }

    pub fn is_tessellated(&self) -> bool {
        self.stages.iter().any(|(kind, _)| kind.is_tessellation())
    }

    /// The lowest OpenGL version that can run the requested stages.
    pub fn required_version(&self) -> GlVersion {
        if self.is_tessellated() && self.gl_version < GlVersion::TESSELLATION {
            info!("tessellation requested, requiring OpenGL {} instead of {}", GlVersion::TESSELLATION, self.gl_version);
            GlVersion::TESSELLATION
        } else {
            self.gl_version
        }
    }
}

fn usage_error(e: clap::Error) -> AppError {
    match e.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
        _ => AppError::Config(e.message),
    }
}

fn default_name(kind: StageKind) -> String {
    format!("default.{}", kind.extension())
}

/// Parses the process arguments. `--help` and `--version` print and exit here.
pub fn parse_args() -> Result<Config, AppError> {
    parse_args_from(std::env::args_os())
}

pub fn parse_args_from<I, T>(args: I) -> Result<Config, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let yaml = load_yaml!("cli.yaml");
    let matches = App::from_yaml(yaml)
        .version(crate_version!())
        .get_matches_from_safe(args)
        .map_err(usage_error)?;

    Config::from_matches(&matches)
}
