//! Snippet classification command.

use std::path::Path;

use anyhow::Result;
use snipview_detect::{detect, editor_language, Classification};

use super::read_snippet;

/// Run the detect command.
pub fn run(input: &Path, json: bool) -> Result<()> {
    let code = read_snippet(input)?;
    let classification = detect(&code);

    if json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
    } else {
        print!("{}", describe(&classification));
    }

    Ok(())
}

/// Human-readable classification report.
fn describe(c: &Classification) -> String {
    format!(
        "language:         {}\nframework:        {}\ndialect:          {}\ncompilation type: {}\neditor language:  {}\n",
        c.language,
        c.framework,
        c.dialect,
        c.compilation_type,
        editor_language(c.compilation_type),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_classification() {
        let report = describe(&Classification::TYPESCRIPT);

        assert!(report.contains("language:         typescript\n"));
        assert!(report.contains("framework:        vanilla\n"));
        assert!(report.contains("compilation type: typescript\n"));
        assert!(report.contains("editor language:  typescript\n"));
    }
}
