//! Public-facing facts handed to the chat assistant as its system context.

use crate::models::SiteConfiguration;
use serde::Serialize;
use std::fmt::Write as _;

/// Business facts the assistant may quote to visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantContext {
    /// Business name
    pub site_name: String,
    /// Street address
    pub address: String,
    /// Opening hours text
    pub opening_hours: String,
    /// Contact phone
    pub phone: String,
    /// Contact e-mail
    pub email: String,
    /// WhatsApp number
    pub whatsapp: String,
    /// Instagram handle
    pub instagram: String,
    /// Titles of the sections visitors can see, in page order
    pub sections: Vec<String>,
}

impl AssistantContext {
    /// Extracts the context from a configuration. Disabled sections are left out.
    #[must_use]
    pub fn from_config(config: &SiteConfiguration) -> Self {
        Self {
            site_name: config.site_name.clone(),
            address: config.address.clone(),
            opening_hours: config.opening_hours.clone(),
            phone: config.phone.clone(),
            email: config.email.clone(),
            whatsapp: config.whatsapp.clone(),
            instagram: config.instagram.clone(),
            sections: config
                .sections
                .iter()
                .filter(|s| s.enabled && !s.title.trim().is_empty())
                .map(|s| s.title.clone())
                .collect(),
        }
    }

    /// Renders the context as the assistant's system prompt.
    ///
    /// Blank contact fields are omitted rather than rendered empty.
    #[must_use]
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!(
            "Eres el asistente virtual de {}. Responde de forma breve y amable \
             usando solo la información siguiente.\n",
            self.site_name
        );

        let facts = [
            ("Dirección", &self.address),
            ("Horario", &self.opening_hours),
            ("Teléfono", &self.phone),
            ("Email", &self.email),
            ("WhatsApp", &self.whatsapp),
            ("Instagram", &self.instagram),
        ];
        for (label, value) in facts {
            if !value.trim().is_empty() {
                let _ = writeln!(prompt, "- {label}: {}", value.trim());
            }
        }

        if !self.sections.is_empty() {
            let _ = writeln!(prompt, "- Secciones de la web: {}", self.sections.join(", "));
        }

        prompt
    }
}
