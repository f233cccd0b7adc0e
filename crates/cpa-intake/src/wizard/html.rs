use tera::{Context, Tera};

use super::view::WizardView;

const WIZARD_TEMPLATE: &str = "wizard.html";

/// HTML rendering of [`WizardView`]s. Values are escaped by the template engine.
#[derive(Debug, Clone)]
pub struct WizardPages {
    tera: Tera,
}

impl WizardPages {
    pub fn new() -> Result<Self, PageError> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            WIZARD_TEMPLATE,
            include_str!("../../templates/wizard.html"),
        )?;
        Ok(Self { tera })
    }

    pub fn render(&self, view: &WizardView) -> Result<String, PageError> {
        let context = Context::from_serialize(view)?;
        Ok(self.tera.render(WIZARD_TEMPLATE, &context)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("page template failed: {0}")]
    Template(#[from] tera::Error),
}
