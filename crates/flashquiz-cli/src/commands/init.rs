//! The `flashquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("flashquiz.toml").exists() {
        println!("flashquiz.toml already exists, skipping.");
    } else {
        std::fs::write("flashquiz.toml", SAMPLE_CONFIG)?;
        println!("Created flashquiz.toml");
    }

    let deck_path = std::path::Path::new("deck.json");
    if deck_path.exists() {
        println!("deck.json already exists, skipping.");
    } else {
        std::fs::write(deck_path, EXAMPLE_DECK)?;
        println!("Created deck.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit flashquiz.toml with your server and username");
    println!("  2. Try an offline quiz: flashquiz quiz --deck deck.json");
    println!("  3. Quiz over your own cards: flashquiz quiz --labels 1");

    Ok(())
}

const SAMPLE_CONFIG: &str = r##"# flashquiz configuration

base_url = "http://localhost:8000"
timeout_secs = 30
username = "${USER}"
password = "${FLASHQUIZ_PASSWORD}"

[theme]
primary = "#ff7f00"
"##;

const EXAMPLE_DECK: &str = r##"{
  "labels": [
    {"id": 1, "name": "Biology", "color": "#10B981"}
  ],
  "cards": [
    {
      "id": 1,
      "title": "Mitochondria",
      "icon": "pi pi-bolt",
      "quick_facts": ["Powerhouse of the cell", "Has its own DNA"],
      "keywords": ["ATP", "organelle", "respiration"],
      "labels": [{"id": 1, "name": "Biology", "color": "#10B981"}]
    },
    {
      "id": 2,
      "title": "Ribosome",
      "icon": "pi pi-cog",
      "quick_facts": ["Builds proteins"],
      "keywords": ["translation", "rRNA"],
      "labels": [{"id": 1, "name": "Biology", "color": "#10B981"}]
    },
    {
      "id": 3,
      "title": "Photosynthesis",
      "icon": "pi pi-sun",
      "quick_facts": [],
      "keywords": ["chlorophyll", "light"],
      "labels": []
    }
  ]
}
"##;
