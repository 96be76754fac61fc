use penscript_core::error::ScriptError;
use penscript_core::interpreter::Interpreter;
use penscript_svg::{RenderOptions, render_with_options};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct CompileOutput {
    svg: String,
    diagnostics: String,
    has_error: bool,
}

#[wasm_bindgen]
impl CompileOutput {
    #[wasm_bindgen(getter)]
    pub fn svg(&self) -> String {
        self.svg.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn diagnostics(&self) -> String {
        self.diagnostics.clone()
    }

    #[wasm_bindgen(getter, js_name = hasError)]
    pub fn has_error(&self) -> bool {
        self.has_error
    }
}

#[wasm_bindgen]
pub fn render_script(source: &str) -> CompileOutput {
    compile_program(source, &RenderOptions::default())
}

/// Like [`render_script`], on a fixed `width` × `height` canvas.
#[wasm_bindgen(js_name = renderScriptOnCanvas)]
pub fn render_script_on_canvas(source: &str, width: f64, height: f64) -> CompileOutput {
    let opts = RenderOptions {
        canvas: Some((width, height)),
        ..RenderOptions::default()
    };
    compile_program(source, &opts)
}

fn compile_program(source: &str, opts: &RenderOptions) -> CompileOutput {
    let mut interpreter = Interpreter::new();
    // Errors are collected; the whole script always runs.
    let _ = interpreter.run(source);

    let diagnostics = collect_diagnostics(interpreter.errors());
    let has_error = !interpreter.errors().is_empty();
    let svg = render_with_options(&interpreter.into_surface(), opts).to_string();

    CompileOutput {
        svg,
        diagnostics,
        has_error,
    }
}

fn collect_diagnostics(errors: &[ScriptError]) -> String {
    errors
        .iter()
        .map(|err| format!("error [{}] {err}", err.kind))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_shapes_to_svg() {
        let output = render_script("pen blue\nmoveto 10 10\ncircle 20\nfill off\nrectangle 5 5");

        assert!(
            !output.has_error,
            "unexpected diagnostics: {}",
            output.diagnostics
        );
        assert!(output.svg.contains("<svg"), "missing SVG root");
        assert!(output.svg.contains("#0000ff"), "missing blue shapes");
    }

    #[test]
    fn reports_errors_for_invalid_source() {
        let output = render_script("moveto 1\nif x > 1\nendif");

        assert!(output.has_error, "expected errors");
        let lines: Vec<&str> = output.diagnostics.lines().collect();
        assert_eq!(lines.len(), 2, "{}", output.diagnostics);
        assert!(lines[0].starts_with("error [invalid parameters] line 1:"), "{}", lines[0]);
        assert!(lines[1].contains("line 2:"), "{}", lines[1]);
        assert!(output.svg.contains("<svg"), "SVG is produced regardless");
    }

    #[test]
    fn canvas_variant_sets_view_box() {
        let output = render_script_on_canvas("drawto 5 5", 200.0, 100.0);
        assert!(output.svg.contains("viewBox=\"0 0 200 100\""), "{}", output.svg);
    }
}
