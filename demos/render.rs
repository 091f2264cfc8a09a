use keyboard_layout::{render_layouts, KeyboardInfo, KeyboardTree};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Matrix {
    #[serde(rename = "MATRIX_ROWS")]
    rows: u8,
    #[serde(rename = "MATRIX_COLS")]
    cols: u8,
}

fn main() -> Result<(), keyboard_layout::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let keyboards = KeyboardTree::builder().root("demos/keyboards").build()?;
    let rules = keyboards.rules("acme/pad")?;
    let config = keyboards.config("acme/pad")?;
    let matrix: Matrix = config.deserialize()?;

    println!("MCU: {:?}", rules.get_str("MCU"));
    println!("Matrix: {}x{}", matrix.rows, matrix.cols);

    let info = KeyboardInfo::from_json(include_str!("keyboards/acme/pad/info.json"))?;
    let layouts = render_layouts(&info);

    for (name, text) in &layouts.rendered {
        println!("{name}:\n{text}\n");
    }
    for (name, err) in &layouts.failures {
        eprintln!("{name}: {err}");
    }

    Ok(())
}
