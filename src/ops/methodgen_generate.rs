//! Implementation of `methodgen generate`.
//!
//! Sources are processed strictly in input order. The whole module is
//! rendered in memory first and written in one step, so a failed run never
//! leaves a partial file behind.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::errors::GenerateError;
use crate::bindings::{Binding, CSharpWriter, DeclarationList, Dialect, SourceUnit};
use crate::util::config::Config;
use crate::util::fs::write_atomic;

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Output file path
    pub output: PathBuf,

    /// Logical native library name
    pub library: String,

    /// Source files, in processing order
    pub inputs: Vec<PathBuf>,

    /// Declaration dialect
    pub dialect: Dialect,

    /// Namespace wrapping the generated class
    pub namespace: Option<String>,

    /// Additional `using` lines
    pub extra_usings: Vec<String>,

    /// Emit the host application's `using` lines
    pub host_usings: bool,

    /// Render and report without writing
    pub dry_run: bool,
}

impl GenerateOptions {
    /// Create options with the default dialect.
    pub fn new(output: impl Into<PathBuf>, library: impl Into<String>, inputs: Vec<PathBuf>) -> Self {
        GenerateOptions {
            output: output.into(),
            library: library.into(),
            inputs,
            dialect: Dialect::default(),
            namespace: None,
            extra_usings: Vec::new(),
            host_usings: false,
            dry_run: false,
        }
    }

    /// Take dialect and output settings from a config.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.dialect = config.dialect.clone();
        self.namespace = config.output.namespace.clone();
        self.extra_usings = config.output.extra_usings.clone();
        self.host_usings = config.output.host_usings;
        self
    }

    /// Set dry run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn writer(&self) -> CSharpWriter {
        CSharpWriter::new(&self.library)
            .with_namespace(self.namespace.clone())
            .with_host_usings(self.host_usings)
            .with_extra_usings(self.extra_usings.clone())
    }
}

/// Summary of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Source files scanned
    pub files: usize,
    /// Files that contributed a region
    pub regions: usize,
    /// Generated function declarations
    pub functions: usize,
    /// Declarations left for manual binding
    pub manual: usize,
    /// Enum declarations emitted
    pub enums: usize,
    /// Declarations dropped as unparseable
    pub skipped: usize,
}

impl GenerateReport {
    fn from_lists(lists: &[DeclarationList]) -> Self {
        let mut report = GenerateReport {
            files: lists.len(),
            ..Default::default()
        };

        for list in lists {
            report.skipped += list.skipped.len();
            if list.is_empty() {
                continue;
            }
            report.regions += 1;
            report.enums += list.enums.len();
            for decl in &list.declarations {
                match decl.binding {
                    Binding::Function(_) => report.functions += 1,
                    Binding::FunctionPointer => report.manual += 1,
                }
            }
        }

        report
    }
}

/// The rendered module and the lists it was built from.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub text: String,
    pub lists: Vec<DeclarationList>,
    pub report: GenerateReport,
}

/// Scan every input into a declaration list.
///
/// The accumulated lists are threaded through the fold by value; the first
/// unreadable file or disallowed type aborts the run.
pub fn collect_declarations(
    inputs: &[PathBuf],
    dialect: &Dialect,
) -> Result<Vec<DeclarationList>, GenerateError> {
    if inputs.is_empty() {
        return Err(GenerateError::NoInputs);
    }

    inputs
        .iter()
        .try_fold(Vec::with_capacity(inputs.len()), |mut lists, path| {
            let unit = read_unit(path)?;
            let list = DeclarationList::build(&unit, dialect)
                .map_err(|err| GenerateError::disallowed(&unit, err))?;
            lists.push(list);
            Ok(lists)
        })
}

fn read_unit(path: &Path) -> Result<SourceUnit, GenerateError> {
    debug!("scanning {}", path.display());
    SourceUnit::read(path).map_err(|source| GenerateError::ReadSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Render the interop module without writing it.
pub fn render(opts: &GenerateOptions) -> Result<Rendered, GenerateError> {
    let lists = collect_declarations(&opts.inputs, &opts.dialect)?;
    let text = opts.writer().render(&lists);
    let report = GenerateReport::from_lists(&lists);

    Ok(Rendered {
        text,
        lists,
        report,
    })
}

/// Generate the interop module and write it to `opts.output`.
pub fn generate(opts: &GenerateOptions) -> Result<Rendered, GenerateError> {
    let rendered = render(opts)?;

    if opts.dry_run {
        info!("dry run, not writing {}", opts.output.display());
        return Ok(rendered);
    }

    write_atomic(&opts.output, &rendered.text).map_err(|source| GenerateError::WriteOutput {
        path: opts.output.clone(),
        source,
    })?;

    info!(
        "wrote {} declarations from {} files to {}",
        rendered.report.functions,
        rendered.report.regions,
        opts.output.display()
    );

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MESH_CPP, POINT_IN_POLY_CPP};
    use std::fs;
    use tempfile::TempDir;

    fn write_sources(dir: &Path, sources: &[(&str, &str)]) -> Vec<PathBuf> {
        sources
            .iter()
            .map(|(name, text)| {
                let path = dir.join(name);
                fs::write(&path, text).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_generate_writes_output() {
        let tmp = TempDir::new().unwrap();
        let inputs = write_sources(
            tmp.path(),
            &[("on_mesh.cpp", MESH_CPP), ("geom.cpp", POINT_IN_POLY_CPP)],
        );
        let output = tmp.path().join("AutoNativeMethods.cs");

        let opts = GenerateOptions::new(&output, "rhcommon_c", inputs);
        let rendered = generate(&opts).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), rendered.text);
        assert_eq!(
            rendered.report,
            GenerateReport {
                files: 2,
                regions: 2,
                functions: 3,
                manual: 1,
                enums: 1,
                skipped: 0,
            }
        );

        let mesh = rendered.text.find("#region on_mesh.cpp").unwrap();
        let geom = rendered.text.find("#region geom.cpp").unwrap();
        assert!(mesh < geom);
    }

    #[test]
    fn test_generate_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let inputs = write_sources(tmp.path(), &[("on_mesh.cpp", MESH_CPP)]);
        let output = tmp.path().join("out.cs");
        let opts = GenerateOptions::new(&output, "rhcommon_c", inputs);

        generate(&opts).unwrap();
        let first = fs::read(&output).unwrap();
        generate(&opts).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut inputs = write_sources(tmp.path(), &[("geom.cpp", POINT_IN_POLY_CPP)]);
        inputs.push(tmp.path().join("missing.cpp"));
        let output = tmp.path().join("out.cs");

        let err = generate(&GenerateOptions::new(&output, "rhcommon_c", inputs)).unwrap_err();

        assert!(matches!(err, GenerateError::ReadSource { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_non_utf8_comment_is_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("legacy.cpp");
        fs::write(&path, b"// Copyright Caf\xe9\nRH_C_FUNCTION int F(int a)\n{}\n").unwrap();

        let rendered = render(&GenerateOptions::new("out.cs", "rhcommon_c", vec![path])).unwrap();

        assert_eq!(rendered.report.functions, 1);
        assert!(rendered.text.contains("internal static extern int F(int a);"));
    }

    #[test]
    fn test_disallowed_type_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let inputs = write_sources(
            tmp.path(),
            &[("on_circle.cpp", "RH_C_FUNCTION void F(ON_Circle* c)\n{}\n")],
        );
        let output = tmp.path().join("out.cs");
        fs::write(&output, "previous").unwrap();

        let err = generate(&GenerateOptions::new(&output, "rhcommon_c", inputs)).unwrap_err();

        assert!(matches!(err, GenerateError::DisallowedType { .. }));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_no_inputs() {
        let err = render(&GenerateOptions::new("out.cs", "rhcommon_c", Vec::new())).unwrap_err();
        assert!(matches!(err, GenerateError::NoInputs));
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let tmp = TempDir::new().unwrap();
        let inputs = write_sources(tmp.path(), &[("geom.cpp", POINT_IN_POLY_CPP)]);
        let output = tmp.path().join("out.cs");

        let opts = GenerateOptions::new(&output, "rhcommon_c", inputs).with_dry_run(true);
        let rendered = generate(&opts).unwrap();

        assert!(rendered.text.contains("RHC_PointInPoly"));
        assert!(!output.exists());
    }

    #[test]
    fn test_config_dialect_is_used() {
        let tmp = TempDir::new().unwrap();
        let inputs = write_sources(
            tmp.path(),
            &[("custom.cpp", "MY_EXPORT int Answer()\n{ return 42; }\n")],
        );
        let mut config = Config::default();
        config.dialect.marker = "MY_EXPORT".to_string();
        config.output.namespace = Some("Custom.Native".to_string());

        let opts = GenerateOptions::new("unused.cs", "custom", inputs).with_config(&config);
        let rendered = render(&opts).unwrap();

        assert!(rendered.text.contains("namespace Custom.Native\n{\n"));
        assert!(rendered.text.contains("internal static extern int Answer();"));
    }
}
