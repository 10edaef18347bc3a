use eframe::egui;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::info;

use turfmast_core::spoiler::spoiler_path;
use turfmast_core::{parse_seed, run as run_randomiser, RandomiserSettings};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GuiConfig {
    input_path: String,
    output_path: String,
}

fn config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir().or_else(dirs::data_dir)?;
    base.push("TurfMastRand");
    base.push("gui_config.json");
    Some(base)
}

fn load_config() -> GuiConfig {
    if let Some(path) = config_path() {
        if let Ok(data) = fs::read_to_string(&path) {
            if let Ok(cfg) = serde_json::from_str::<GuiConfig>(&data) {
                return cfg;
            }
        }
    }
    GuiConfig::default()
}

fn save_config(cfg: &GuiConfig) {
    if let Some(path) = config_path() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(data) = serde_json::to_string_pretty(cfg) {
            let _ = fs::write(path, data);
        }
    }
}

/// `foo.p1` -> `foo-rand.p1`, next to the input.
fn default_output_for(input: &Path) -> Option<PathBuf> {
    let stem = input.file_stem()?.to_string_lossy();
    let name = match input.extension() {
        Some(ext) => format!("{}-rand.{}", stem, ext.to_string_lossy()),
        None => format!("{}-rand", stem),
    };
    Some(input.with_file_name(name))
}

fn random_seed_text() -> String {
    format!("{:08X}", rand::thread_rng().gen::<u32>())
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ConfigTab {
    General,
    Course,
}

struct RandomiserApp {
    current_tab: ConfigTab,
    input_path: String,
    output_path: String,
    seed_text: String,

    randomize_holes: bool,
    randomize_pins: bool,
    write_spoiler: bool,

    is_running: bool,
    log: String,
    result_rx: Option<mpsc::Receiver<String>>,
}

impl Default for RandomiserApp {
    fn default() -> Self {
        let cfg = load_config();

        Self {
            current_tab: ConfigTab::General,
            input_path: cfg.input_path,
            output_path: cfg.output_path,
            seed_text: random_seed_text(),

            randomize_holes: true,
            randomize_pins: true,
            write_spoiler: false,

            is_running: false,
            log: String::new(),
            result_rx: None,
        }
    }
}

impl RandomiserApp {
    fn push_log(&mut self, line: &str) {
        if !self.log.is_empty() {
            self.log.push('\n');
        }
        self.log.push_str(line);
    }

    fn start_run(&mut self) {
        let seed = match parse_seed(&self.seed_text) {
            Ok(seed) => seed,
            Err(e) => {
                self.push_log(&format!("Randomiser error: {}", e));
                return;
            }
        };

        let input = PathBuf::from(self.input_path.trim());
        let output = PathBuf::from(self.output_path.trim());

        // Persist GUI config right before launching.
        save_config(&GuiConfig {
            input_path: self.input_path.clone(),
            output_path: self.output_path.clone(),
        });

        let settings = RandomiserSettings {
            seed,
            randomize_holes: self.randomize_holes,
            randomize_pins: self.randomize_pins,
            write_spoiler: self.write_spoiler,
            input_path: input,
            output_path: output,
        };

        let (tx, rx) = mpsc::channel();
        self.result_rx = Some(rx);
        self.is_running = true;
        self.push_log(&format!("Starting randomiser with seed {:08X}...", seed));
        info!("starting run with seed {:08X}", seed);

        thread::spawn(move || {
            let spoiler = settings
                .write_spoiler
                .then(|| spoiler_path(&settings.output_path));
            let output = settings.output_path.clone();
            let message = match run_randomiser(settings) {
                Ok(()) => match spoiler {
                    Some(spoiler) => format!(
                        "Wrote {} (spoiler log: {}).",
                        output.display(),
                        spoiler.display()
                    ),
                    None => format!("Wrote {}.", output.display()),
                },
                Err(e) => format!("Randomiser error: {}", e),
            };

            let _ = tx.send(message);
        });
    }
}

impl eframe::App for RandomiserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut finished = Vec::new();
        if let Some(rx) = self.result_rx.as_ref() {
            while let Ok(msg) = rx.try_recv() {
                finished.push(msg);
            }
        }
        for msg in finished {
            self.push_log(&msg);
            self.is_running = false;
            self.result_rx = None;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_tab, ConfigTab::General, "General");
                ui.selectable_value(&mut self.current_tab, ConfigTab::Course, "Course");
            });

            ui.separator();

            match self.current_tab {
                ConfigTab::General => {
                    ui.horizontal(|ui| {
                        ui.label("P1 ROM:");
                        ui.text_edit_singleline(&mut self.input_path);
                        if ui.button("Browse...").clicked() {
                            let mut dialog = rfd::FileDialog::new();
                            if let Some(dir) = Path::new(self.input_path.trim()).parent() {
                                if dir.is_dir() {
                                    dialog = dialog.set_directory(dir);
                                }
                            }
                            if let Some(path) = dialog.pick_file() {
                                if self.output_path.trim().is_empty() {
                                    if let Some(out) = default_output_for(&path) {
                                        self.output_path = out.display().to_string();
                                    }
                                }
                                self.input_path = path.display().to_string();
                            }
                        }
                    });

                    ui.horizontal(|ui| {
                        ui.label("Output ROM:");
                        ui.text_edit_singleline(&mut self.output_path);
                        if ui.button("Browse...").clicked() {
                            let mut dialog = rfd::FileDialog::new();
                            if let Some(dir) = Path::new(self.output_path.trim()).parent() {
                                if dir.is_dir() {
                                    dialog = dialog.set_directory(dir);
                                }
                            }
                            if let Some(path) = dialog.save_file() {
                                self.output_path = path.display().to_string();
                            }
                        }
                    });

                    ui.horizontal(|ui| {
                        ui.label("Seed (hex):");
                        ui.text_edit_singleline(&mut self.seed_text);

                        if ui.button("Random seed").clicked() {
                            self.seed_text = random_seed_text();
                        }
                    });
                }
                ConfigTab::Course => {
                    ui.label("Course randomisation:");
                    ui.checkbox(&mut self.randomize_holes, "Shuffle holes across all four courses");
                    ui.checkbox(&mut self.randomize_pins, "Generate new pin locations");
                    ui.separator();
                    ui.checkbox(&mut self.write_spoiler, "Write spoiler log next to the output");
                }
            }

            ui.separator();

            let can_run =
                !self.is_running && (self.randomize_holes || self.randomize_pins);
            if ui
                .add_enabled(can_run, egui::Button::new("Run randomiser"))
                .clicked()
            {
                self.start_run();
            }

            ui.separator();
            ui.label("Log:");
            egui::ScrollArea::vertical()
                .id_source("log_scroll")
                .show(ui, |ui| {
                    ui.monospace(&self.log);
                });
        });

        if self.is_running {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([520.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "TurfMastRand",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Box::new(RandomiserApp::default())
        }),
    )
}
