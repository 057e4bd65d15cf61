//! CycloneDX XML rendering.
//!
//! [`render_xml`] produces the document in single-line form; the pipeline
//! writes that to an intermediate `.one.xml` file and runs
//! [`indent_document`] over it to get the multi-line artifact, then removes
//! the intermediate.

use super::SpecVersion;
use crate::error::{Result, SbomError};
use crate::model::{BuildrootBom, Component};
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use serde::Serialize;

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// Render the BOM as a single-line CycloneDX XML document.
pub fn render_xml(bom: &BuildrootBom, spec: SpecVersion) -> Result<String> {
    let document = XmlBom::build(bom, spec);

    let mut body = String::new();
    let serializer = quick_xml::se::Serializer::with_root(&mut body, Some("bom"))
        .map_err(|e| SbomError::render("XML", e.to_string()))?;
    document
        .serialize(serializer)
        .map_err(|e| SbomError::render("XML", e.to_string()))?;

    Ok(format!("{XML_DECL}{body}"))
}

/// Re-indent an XML document into multi-line pretty form.
///
/// Pure byte-stream transform: events are read back and re-written with a
/// two-space indent, nothing about the document content changes.
pub fn indent_document(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => writer
                .write_event(event)
                .map_err(|e| SbomError::render("XML", e.to_string()))?,
            Err(e) => return Err(SbomError::render("XML", e.to_string())),
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| SbomError::render("XML", e.to_string()))
}

#[derive(Debug, Serialize)]
#[serde(rename = "bom")]
struct XmlBom {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@serialNumber")]
    serial_number: String,
    #[serde(rename = "@version")]
    version: u32,
    metadata: XmlMetadata,
    components: XmlComponents,
    dependencies: XmlDependencies,
}

#[derive(Debug, Serialize)]
struct XmlMetadata {
    timestamp: String,
    tools: XmlTools,
    component: XmlComponent,
    manufacture: XmlOrganization,
}

#[derive(Debug, Serialize)]
struct XmlTools {
    tool: Vec<XmlTool>,
}

#[derive(Debug, Serialize)]
struct XmlTool {
    name: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct XmlOrganization {
    name: String,
}

#[derive(Debug, Serialize)]
struct XmlComponents {
    component: Vec<XmlComponent>,
}

#[derive(Debug, Serialize)]
struct XmlComponent {
    #[serde(rename = "@type")]
    component_type: &'static str,
    #[serde(rename = "@bom-ref")]
    bom_ref: String,
    name: String,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<XmlLicenses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<String>,
}

#[derive(Debug, Serialize)]
struct XmlLicenses {
    expression: String,
}

#[derive(Debug, Serialize)]
struct XmlDependencies {
    dependency: Vec<XmlDependency>,
}

#[derive(Debug, Serialize)]
struct XmlDependency {
    #[serde(rename = "@ref")]
    dependency_ref: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dependency: Vec<XmlDependencyRef>,
}

#[derive(Debug, Serialize)]
struct XmlDependencyRef {
    #[serde(rename = "@ref")]
    dependency_ref: String,
}

impl XmlBom {
    fn build(bom: &BuildrootBom, spec: SpecVersion) -> Self {
        let root = XmlComponent {
            component_type: "library",
            bom_ref: bom.root_ref().to_string(),
            name: bom.product.name.clone(),
            version: bom.product.version.clone(),
            licenses: None,
            cpe: None,
            purl: None,
        };

        let component = bom
            .components
            .values()
            .map(XmlComponent::from_component)
            .collect();

        let mut dependency = Vec::with_capacity(bom.components.len() + 1);
        dependency.push(XmlDependency {
            dependency_ref: bom.root_ref().to_string(),
            dependency: bom
                .edges
                .iter()
                .filter(|edge| edge.from == bom.root_ref())
                .map(|edge| XmlDependencyRef {
                    dependency_ref: edge.to.clone(),
                })
                .collect(),
        });
        for name in bom.components.keys() {
            dependency.push(XmlDependency {
                dependency_ref: name.clone(),
                dependency: Vec::new(),
            });
        }

        Self {
            xmlns: spec.xml_namespace(),
            serial_number: super::serial_number(),
            version: 1,
            metadata: XmlMetadata {
                timestamp: super::timestamp(),
                tools: XmlTools {
                    tool: vec![XmlTool {
                        name: env!("CARGO_PKG_NAME"),
                        version: env!("CARGO_PKG_VERSION"),
                    }],
                },
                component: root,
                manufacture: XmlOrganization {
                    name: bom.product.manufacturer.clone(),
                },
            },
            components: XmlComponents { component },
            dependencies: XmlDependencies { dependency },
        }
    }
}

impl XmlComponent {
    fn from_component(component: &Component) -> Self {
        Self {
            component_type: "firmware",
            bom_ref: component.bom_ref().to_string(),
            name: component.name.clone(),
            version: component.version.clone(),
            licenses: component
                .license
                .clone()
                .map(|expression| XmlLicenses { expression }),
            cpe: component.cpe.clone(),
            purl: Some(component.purl.clone()),
        }
    }
}
