//! Resolved presentation of a section or element.

use crate::cli::common::{print_json, CliError, CliResult, DataArgs};
use crate::services::style::{resolve_element, resolve_section};
use clap::Args;

/// Print the resolved presentation of a section or one of its elements
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Section id
    section: String,

    /// Element id inside the section
    #[arg(long)]
    element: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    /// Execute render command
    pub fn execute(&self, data: &DataArgs) -> CliResult<()> {
        let editor = data.open_editor()?;
        let section = editor
            .config()
            .section(&self.section)
            .ok_or_else(|| CliError::not_found(format!("Section '{}' not found", self.section)))?;

        let Some(element_id) = &self.element else {
            let presentation = resolve_section(&section.style);
            if self.json {
                return print_json(&presentation);
            }
            print_block(&format!("#{}", section.id), &presentation.to_css_declarations());
            if let Some(layer) = presentation.image_layer_declarations() {
                print_block(&format!("#{}::before", section.id), &layer);
            }
            return Ok(());
        };

        let element = section.element(element_id).ok_or_else(|| {
            CliError::not_found(format!(
                "Element '{element_id}' not found in section '{}'",
                section.id
            ))
        })?;

        let presentation = resolve_element(element);
        if self.json {
            return print_json(&presentation);
        }

        print_block(&format!("#{}", element.id), &presentation.to_css_declarations());
        if let Some(frame) = &presentation.frame {
            print_block(&format!("#{} img", element.id), &frame.to_css_declarations());
        }
        let mut hover = vec![("transform", presentation.hover.transform.to_css())];
        if let Some(filter) = &presentation.hover.filter {
            hover.push(("filter", filter.clone()));
        }
        print_block(&format!("#{}:hover", element.id), &hover);
        Ok(())
    }
}

fn print_block(selector: &str, decls: &[(&'static str, String)]) {
    println!("{selector} {{");
    for (name, value) in decls {
        println!("  {name}: {value};");
    }
    println!("}}");
}
