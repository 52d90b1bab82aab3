use std::{env, path::PathBuf, time::Instant};

use itemscan::io::{RecognizeConfig, RecognizeReport};
use itemscan::{gray_view, recognize, CancelToken, TemplateCatalog};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config_path = parse_config_path();
    let cfg = RecognizeConfig::load_json(&config_path)?;

    let catalog = TemplateCatalog::load_dir(&cfg.templates_dir, cfg.strict_catalog)?;
    let scene = image::ImageReader::open(&cfg.scene_path)?
        .decode()?
        .to_luma8();

    let camera = cfg.camera.as_ref().map(|c| c.build()).transpose()?;
    let params = cfg.build_params();

    let mut report = RecognizeReport::new(&cfg);
    let start = Instant::now();
    match recognize(
        &gray_view(&scene),
        camera.as_ref(),
        &catalog,
        &params,
        &CancelToken::new(),
    ) {
        Ok(recognition) => {
            println!(
                "best match: {} ({} instance(s)) in {:.1?}",
                recognition.best.name,
                recognition.best.count,
                start.elapsed()
            );
            report.set_recognition(recognition);
        }
        Err(err) => {
            eprintln!("recognition failed: {err}");
            report.set_error(&err);
        }
    }

    let output_path = cfg.output_path();
    report.write_json(&output_path)?;
    println!("wrote report JSON to {}", output_path.display());
    Ok(())
}

fn parse_config_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/recognize_config.json"))
}
