//! Extract command handler

use super::load_catalog;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::OutputWriter;
use serde_json::{Map, Value};
use specado_boundary::{
    timing, AttributeSet, AttributeSpec, CatalogModel, Model, ModelClass, ModelInstance,
};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info, instrument, trace, Level};

/// Catalog model whose attribute resolutions are timed
struct TimedModel<'a>(CatalogModel<'a>);

impl ModelClass for TimedModel<'_> {
    fn attributes(&self) -> &AttributeSet {
        self.0.attributes()
    }

    fn around_attribute(
        &self,
        name: &str,
        resolve: &mut dyn FnMut() -> specado_boundary::Result<Option<Value>>,
    ) -> specado_boundary::Result<Option<Value>> {
        timing::timed(name, resolve)
    }

    fn resolve_attribute(
        &self,
        spec: &AttributeSpec,
        model: &Model,
    ) -> specado_boundary::Result<Option<Value>> {
        self.0.resolve_attribute(spec, model)
    }
}

/// Handle the extract command
#[instrument(skip(config, output), fields(input = %args.input.display(), model = %args.model))]
pub fn handle_extract(args: ExtractArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("extract_command", &format!("model: {}", args.model));

    let catalog_path = config.catalog_path(args.catalog.as_deref())?;
    let show_absent = args.show_absent || config.extract.show_absent;
    info!(catalog = %catalog_path.display(), show_absent, "Extracting attributes");

    let input = read_input(&args.input)?;
    let mapping = extract(&catalog_path, &args.model, input, show_absent)?;

    output.mapping(&mapping)
}

/// Extract the output mapping of `model_name` from an input document
pub(crate) fn extract(
    catalog_path: &Path,
    model_name: &str,
    input: Value,
    show_absent: bool,
) -> Result<Map<String, Value>> {
    let catalog = load_catalog(catalog_path)?;
    let class = catalog
        .model(model_name)
        .ok_or_else(|| Error::ModelNotFound {
            name: model_name.to_string(),
            catalog: catalog_path.to_path_buf(),
        })?;

    if tracing::enabled!(Level::TRACE) {
        let mut logged = input.clone();
        redaction::redact_json_value(&mut logged);
        trace!(input = %logged, "Wrapping input");
    }

    let instance = ModelInstance::new(TimedModel(class), Model::from_value(input)?);
    let mapping = instance.to_map(show_absent)?;
    debug!(attributes = mapping.len(), "Extraction completed");
    Ok(mapping)
}

/// Read an input document; `-` reads JSON from stdin
pub(crate) fn read_input(path: &Path) -> Result<Value> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        return parse_input(path, &content, false);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!("Input read, {} bytes", content.len());

    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("yaml") || s.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);
    parse_input(path, &content, is_yaml)
}

fn parse_input(path: &Path, content: &str, is_yaml: bool) -> Result<Value> {
    if is_yaml {
        serde_yaml::from_str(content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}
