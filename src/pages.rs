use crate::{prediction::PredictionResult, roast_level::RoastLevel};
use axum::response::Html;
use minijinja::{context, Environment, Value};
use serde::Serialize;
use thiserror::Error;

/// Menu entries. Routing and the navigation bar both iterate [`Page::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Dashboard,
    Predict,
    Education,
    About,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Dashboard,
        Page::Predict,
        Page::Education,
        Page::About,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Dashboard => "/dashboard",
            Page::Predict => "/predict",
            Page::Education => "/education",
            Page::About => "/about",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Dashboard => "Dashboard",
            Page::Predict => "Predict Image",
            Page::Education => "Roasting Education",
            Page::About => "About",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Page::Home => "home.html",
            Page::Dashboard => "dashboard.html",
            Page::Predict => "predict.html",
            Page::Education => "education.html",
            Page::About => "about.html",
        }
    }
}

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

#[derive(Serialize)]
struct MenuItem {
    path: &'static str,
    title: &'static str,
    active: bool,
}

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, PageError> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../templates/base.html"))?;
        env.add_template("home.html", include_str!("../templates/home.html"))?;
        env.add_template("dashboard.html", include_str!("../templates/dashboard.html"))?;
        env.add_template("predict.html", include_str!("../templates/predict.html"))?;
        env.add_template("education.html", include_str!("../templates/education.html"))?;
        env.add_template("about.html", include_str!("../templates/about.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, page: Page, content: Value) -> Result<Html<String>, PageError> {
        let menu: Vec<MenuItem> = Page::ALL
            .iter()
            .map(|item| MenuItem {
                path: item.path(),
                title: item.title(),
                active: *item == page,
            })
            .collect();

        let html = self.env.get_template(page.template())?.render(context! {
            title => page.title(),
            menu => menu,
            page => content,
        })?;

        Ok(Html(html))
    }
}

/// What the predict page shows below the upload form.
#[derive(Debug)]
pub enum PredictView {
    NoInput,
    Predicted {
        prediction: PredictionResult,
        preview: Option<String>,
    },
    Failed(String),
}

pub fn home_context() -> Value {
    context! {
        metrics => vec![
            context! { label => "Models", value => "1 CNN" },
            context! { label => "Model accuracy", value => ">90%" },
            context! { label => "Classes", value => "4 levels" },
        ],
        features => vec![
            "Automatic roast level prediction",
            "Upload coffee bean images directly",
            "Interactive dashboard",
            "Explanation of every roast level",
            "Suitable for research and education",
        ],
    }
}

const DATA_DISTRIBUTION: [(&str, u32); 4] =
    [("Green", 20), ("Light", 35), ("Medium", 30), ("Dark", 15)];
const ACCURACY_HISTORY: [u32; 5] = [82, 85, 88, 90, 92];

pub fn dashboard_context() -> Value {
    let max = DATA_DISTRIBUTION
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(1);
    let distribution: Vec<Value> = DATA_DISTRIBUTION
        .iter()
        .map(|(label, count)| {
            context! { label => label, count => count, width => count * 100 / max }
        })
        .collect();
    let accuracy: Vec<Value> = ACCURACY_HISTORY
        .iter()
        .enumerate()
        .map(|(epoch, value)| context! { step => epoch + 1, value => value })
        .collect();

    context! {
        distribution => distribution,
        accuracy => accuracy,
        input_size => crate::preprocessing::INPUT_SIZE,
    }
}

pub fn predict_context(view: &PredictView) -> Value {
    match view {
        PredictView::NoInput => context! { state => "idle" },
        PredictView::Predicted {
            prediction,
            preview,
        } => context! {
            state => "result",
            label => prediction.display_label(),
            confidence => prediction.display_confidence(),
            progress => prediction.progress(),
            preview => preview,
        },
        PredictView::Failed(message) => context! { state => "error", message => message },
    }
}

pub fn education_context(selected: RoastLevel) -> Value {
    let levels: Vec<Value> = RoastLevel::BY_ROAST
        .iter()
        .map(|level| {
            context! {
                value => level.as_str(),
                title => level.title(),
                selected => *level == selected,
            }
        })
        .collect();

    context! {
        levels => levels,
        heading => selected.title().to_uppercase(),
        description => selected.description(),
    }
}

pub fn about_context() -> Value {
    context! {
        stack => vec!["Rust", "ONNX Runtime", "CNN", "axum"],
    }
}
