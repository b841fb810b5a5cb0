// Copyright @yucwang 2026

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::core::session::{default_light, Dataset, RenderSettings, Session};
use crate::materials::library::MaterialLibrary;
use crate::materials::rule::{MaterialRule, RuleSet};
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::math::vector::parse_vector3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed session file: {0}")]
    Parse(String),
    #[error("missing attribute {0}")]
    MissingField(&'static str),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Parsed contents of a session file, before any volume is loaded.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub datasets: Vec<Dataset>,
    pub library: MaterialLibrary,
    pub settings: RenderSettings,
    pub light: Vector3f,
}

impl SessionConfig {
    pub fn into_session(self) -> Session {
        Session::new(self.datasets, self.library, self.settings, self.light)
    }
}

pub fn load_session<P: AsRef<Path>>(path: P) -> Result<Session, ConfigError> {
    Ok(load_session_config(path)?.into_session())
}

pub fn load_session_config<P: AsRef<Path>>(path: P) -> Result<SessionConfig, ConfigError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_session(&xml, base_dir)
}

/// Parses a session description. Dataset paths are resolved against
/// `base_dir`; rule sets extend the built-in library.
pub fn parse_session(xml: &str, base_dir: &Path) -> Result<SessionConfig, ConfigError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut datasets = Vec::new();
    let mut parsed = MaterialLibrary::new();
    let mut settings = RenderSettings::default();
    let mut light = default_light();
    let mut current_set: Option<RuleSet> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"dataset" => datasets.push(parse_dataset(&e, base_dir)?),
                b"materials" => {
                    let name = attribute(&e, "name")?.ok_or(ConfigError::MissingField("materials.name"))?;
                    // a self-closing <materials/> never sees its end tag
                    if let Some(previous) = current_set.take() {
                        parsed.insert(previous);
                    }
                    current_set = Some(RuleSet::new(&name, Vec::new()));
                }
                b"rule" => {
                    let set = current_set
                        .as_mut()
                        .ok_or_else(|| ConfigError::Parse("<rule> outside of <materials>".to_string()))?;
                    set.push(parse_rule(&e)?);
                }
                b"float" => {
                    let name = attribute(&e, "name")?.ok_or(ConfigError::MissingField("float.name"))?;
                    let value = attribute(&e, "value")?.ok_or(ConfigError::MissingField("float.value"))?;
                    let value = parse_float(&name, &value)?;
                    match name.as_str() {
                        "point_size" => settings.point_size = value,
                        "billboard_size" => settings.billboard_size = value,
                        "enhance_distance" => settings.enhance_distance = value,
                        "lod_distance" => settings.lod_distance = value,
                        "lod_hysteresis" => settings.lod_hysteresis = value,
                        "additive_gain" => settings.additive_gain = value,
                        _ => log::warn!("Unknown setting '{}' ignored.", name),
                    }
                }
                b"vector" => {
                    let name = attribute(&e, "name")?.ok_or(ConfigError::MissingField("vector.name"))?;
                    let value = attribute(&e, "value")?.ok_or(ConfigError::MissingField("vector.value"))?;
                    if name == "light" {
                        light = parse_vec3(&name, &value)?;
                    } else {
                        log::warn!("Unknown vector '{}' ignored.", name);
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"materials" {
                    if let Some(set) = current_set.take() {
                        log::debug!("Material set '{}' with {} rules.", set.name, set.rules().len());
                        parsed.insert(set);
                    }
                }
            }
            Err(e) => return Err(ConfigError::Parse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if let Some(set) = current_set.take() {
        parsed.insert(set);
    }
    let mut library = MaterialLibrary::builtin();
    library.merge(parsed);
    for dataset in datasets.iter() {
        for name in [&dataset.materials, &dataset.flat_materials].iter() {
            if !library.contains(name) {
                return Err(ConfigError::InvalidValue {
                    field: format!("dataset '{}' materials", dataset.name),
                    value: name.to_string(),
                });
            }
        }
    }

    Ok(SessionConfig { datasets, library, settings, light })
}

fn parse_dataset(e: &BytesStart, base_dir: &Path) -> Result<Dataset, ConfigError> {
    let filename = attribute(e, "filename")?.ok_or(ConfigError::MissingField("dataset.filename"))?;
    let path = if Path::new(&filename).is_absolute() {
        PathBuf::from(&filename)
    } else {
        base_dir.join(&filename)
    };
    let name = match attribute(e, "name")? {
        Some(name) => name,
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| filename.clone()),
    };
    let materials = attribute(e, "materials")?.unwrap_or_else(|| "bonsai".to_string());
    let flat_materials = attribute(e, "flat_materials")?.unwrap_or_else(|| format!("{}_flat", materials));
    Ok(Dataset { name, path, materials, flat_materials })
}

fn parse_rule(e: &BytesStart) -> Result<MaterialRule, ConfigError> {
    let name = attribute(e, "name")?.unwrap_or_default();
    let low = attribute(e, "low")?.ok_or(ConfigError::MissingField("rule.low"))?;
    let high = attribute(e, "high")?.ok_or(ConfigError::MissingField("rule.high"))?;
    let color = attribute(e, "color")?.ok_or(ConfigError::MissingField("rule.color"))?;
    let color = parse_vec3("rule.color", &color)?;
    Ok(MaterialRule::new(
        &name,
        parse_float("rule.low", &low)?,
        parse_float("rule.high", &high)?,
        RGBSpectrum::from_vector(color),
    ))
}

fn attribute(e: &BytesStart, key: &str) -> Result<Option<String>, ConfigError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ConfigError::Parse(err.to_string()))?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = attr.unescape_value().map_err(|err| ConfigError::Parse(err.to_string()))?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

fn parse_float(field: &str, value: &str) -> Result<Float, ConfigError> {
    value.trim().parse::<Float>().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_vec3(field: &str, value: &str) -> Result<Vector3f, ConfigError> {
    parse_vector3(value).ok_or_else(|| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}
