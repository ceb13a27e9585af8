//! Builders for catalog records with sensible test defaults

use winscript_core::{Application, ApplicationOption, Catalog, Optimization, Tweak};

/// Builder for constructing Application records
#[derive(Debug, Clone)]
pub struct AppBuilder {
    app: Application,
}

impl AppBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            app: Application {
                id: id.to_string(),
                name: name.to_string(),
                category: "Tools".to_string(),
                description: format!("{name} for Windows"),
                image_url: String::new(),
                download_url: format!("https://downloads.example.com/{id}.exe"),
                install_args: "/S".to_string(),
                options: Vec::new(),
                version: None,
            },
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.app.category = category.to_string();
        self
    }

    pub fn install_args(mut self, args: &str) -> Self {
        self.app.install_args = args.to_string();
        self
    }

    pub fn option(mut self, name: &str, download_url: &str) -> Self {
        let n = self.app.options.len() + 1;
        self.app.options.push(ApplicationOption {
            id: format!("{}-{}", self.app.id, n),
            name: name.to_string(),
            application_id: self.app.id.clone(),
            download_url: download_url.to_string(),
            install_args: String::new(),
        });
        self
    }

    pub fn build(self) -> Application {
        self.app
    }
}

/// The Java application with two real versions and one unknown version
pub fn java_app() -> Application {
    AppBuilder::new("java", "Java")
        .category("Development")
        .install_args("")
        .option("OpenJDK 21.0.2", "https://downloads.example.com/java/21")
        .option("OpenJDK 17.0.2", "https://downloads.example.com/java/17")
        .option("OpenJDK 99.0.0", "https://downloads.example.com/java/99")
        .build()
}

pub fn optimization(id: &str, script: &str) -> Optimization {
    Optimization {
        id: id.to_string(),
        name: format!("Optimization {id}"),
        description: String::new(),
        script: script.to_string(),
    }
}

pub fn tweak(id: &str, command: &str) -> Tweak {
    Tweak {
        id: id.to_string(),
        name: format!("Tweak {id}"),
        category: "Explorer".to_string(),
        description: String::new(),
        long_description: String::new(),
        command: command.to_string(),
    }
}

/// A small catalog covering every record kind
pub fn sample_catalog() -> Catalog {
    Catalog {
        applications: vec![
            java_app(),
            AppBuilder::new("vlc", "VLC").category("Media").build(),
            AppBuilder::new("7zip", "7-Zip").build(),
        ],
        optimizations: vec![optimization("telemetry", "Stop-Service DiagTrack")],
        tweaks: vec![tweak("ext", "Set-ItemProperty -Path HKCU:\\x -Name HideFileExt -Value 0")],
    }
}
