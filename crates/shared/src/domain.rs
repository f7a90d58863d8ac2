use serde::{Deserialize, Serialize};

/// The three fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Message,
    ];
}

/// Current values of the contact form, one instance per form session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    WebDevelopment,
    GraphicDesign,
}

/// A portfolio entry. Web projects carry a link to the deployed site;
/// graphic-design projects are image-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Project {
    Web {
        title: String,
        description: String,
        accent_color: String,
        live_link: String,
        image: Option<String>,
    },
    Graphic {
        title: String,
        description: String,
        accent_color: String,
        image: Option<String>,
    },
}

impl Project {
    pub fn category(&self) -> ProjectCategory {
        match self {
            Project::Web { .. } => ProjectCategory::WebDevelopment,
            Project::Graphic { .. } => ProjectCategory::GraphicDesign,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Project::Web { title, .. } | Project::Graphic { title, .. } => title,
        }
    }

    pub fn live_link(&self) -> Option<&str> {
        match self {
            Project::Web { live_link, .. } => Some(live_link),
            Project::Graphic { .. } => None,
        }
    }
}

/// Filter tabs above the portfolio grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortfolioTab {
    All,
    Web,
    Graphics,
}

/// Projects visible under the given tab, in their original order.
pub fn filter_projects(projects: &[Project], tab: PortfolioTab) -> Vec<&Project> {
    projects
        .iter()
        .filter(|project| match tab {
            PortfolioTab::All => true,
            PortfolioTab::Web => project.category() == ProjectCategory::WebDevelopment,
            PortfolioTab::Graphics => project.category() == ProjectCategory::GraphicDesign,
        })
        .collect()
}
