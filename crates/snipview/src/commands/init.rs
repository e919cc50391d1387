//! Scaffold a snippets project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Sample snippets written by `init`, relative to the snippets directory.
const SAMPLES: &[(&str, &str)] = &[
    ("react/Counter.jsx", SAMPLE_COUNTER),
    ("vue/Greeting.vue", SAMPLE_GREETING),
    ("styles/buttons.scss", SAMPLE_BUTTONS),
    ("hello.html", SAMPLE_HELLO),
];

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing snipview...");

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    scaffold(root, config_path, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'snipview dev' to start the live preview server.");

    Ok(())
}

fn scaffold(root: &Path, config_path: &Path, yes: bool) -> Result<()> {
    let snippets_dir = root.join("snippets");

    if snippets_dir.exists() && !yes {
        tracing::warn!("snippets/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    for (relative, content) in SAMPLES {
        let path = snippets_dir.join(relative);
        if path.exists() && !yes {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created snippets/{}", relative);
    }

    Ok(())
}

pub const DEFAULT_CONFIG: &str = r#"# Snipview Configuration

[snippets]
# Directory containing snippet files
dir = "snippets"

[server]
port = 7777
host = "127.0.0.1"
# Quiet period before a changed snippet is recompiled
debounce_ms = 300

[build]
# Output directory for the static gallery
output = "dist"
title = "Snippet Gallery"
# Base URL (for deployment)
base_url = "/"
minify = true
"#;

const SAMPLE_COUNTER: &str = r#"---
title: Counter
description: A button that counts its **clicks**.
category: React
tags: [hooks, state]
order: 1
---
import React, { useState } from 'react';

function Counter() {
  const [count, setCount] = useState(0);

  return (
    <button onClick={() => setCount(count + 1)}>
      Clicked {count} times
    </button>
  );
}

export default Counter;
"#;

const SAMPLE_GREETING: &str = r#"---
title: Greeting
description: Two-way binding with `v-model`.
category: Vue
order: 1
---
<template>
  <div class="greeting">
    <input v-model="name" placeholder="Your name">
    <p>Hello, {{ name || 'stranger' }}!</p>
  </div>
</template>

<script>
import { ref } from 'vue';

export default {
  setup() {
    const name = ref('');
    return { name };
  }
}
</script>

<style>
.greeting { font-family: system-ui, sans-serif; }
</style>
"#;

const SAMPLE_BUTTONS: &str = r#"---
title: Buttons
category: Styles
tags: [scss]
---
$primary: #3b82f6;

.btn {
  padding: 0.5rem 1rem;
  border-radius: 0.375rem;

  &-primary {
    background: $primary;
    color: white;
  }
}
"#;

const SAMPLE_HELLO: &str = r#"---
title: Hello
description: Plain markup, rendered as-is.
---
<section class="hello">
  <h1>Hello from snipview</h1>
  <p>Edit <code>snippets/hello.html</code> while <code>snipview dev</code> is running.</p>
</section>
"#;
