//! Catalog rows as the hosted store returns them

use serde_json::{json, Value};

pub const ANON_KEY: &str = "test-anon-key";

pub fn application_rows() -> Value {
    json!([
        {
            "id": "java",
            "name": "Java",
            "category": "Development",
            "description": "OpenJDK runtime",
            "image_url": "https://cdn.example.com/java.png",
            "download_url": "https://downloads.example.com/java",
            "install_args": null,
            "created_at": "2025-02-24T10:00:00Z"
        },
        {
            "id": "vlc",
            "name": "VLC",
            "category": "Media",
            "description": "Media player",
            "image_url": "",
            "download_url": "https://downloads.example.com/vlc.exe",
            "install_args": "/S"
        },
        {
            "id": "vlc",
            "name": "VLC (duplicate row)",
            "category": "Media",
            "description": "",
            "image_url": "",
            "download_url": "https://downloads.example.com/vlc-dup.exe",
            "install_args": "/S"
        }
    ])
}

pub fn option_rows() -> Value {
    json!([
        {
            "id": "java-21",
            "name": "OpenJDK 21.0.2",
            "application_id": "java",
            "download_url": "https://downloads.example.com/java/21",
            "install_args": ""
        },
        {
            "id": "java-17",
            "name": "OpenJDK 17.0.2",
            "application_id": "java",
            "download_url": "https://downloads.example.com/java/17",
            "install_args": ""
        }
    ])
}

pub fn optimization_rows() -> Value {
    json!([
        {
            "id": "telemetry",
            "name": "Disable telemetry",
            "description": "Stops the DiagTrack service",
            "script": "Stop-Service DiagTrack"
        }
    ])
}

pub fn tweak_rows() -> Value {
    json!([
        {
            "id": "file-ext",
            "name": "Show file extensions",
            "category": "Explorer",
            "description": "Shows extensions for known file types",
            "long_description": null,
            "command": "Set-ItemProperty -Path 'HKCU:\\Software\\Microsoft\\Windows\\CurrentVersion\\Explorer\\Advanced' -Name HideFileExt -Value 0"
        }
    ])
}
