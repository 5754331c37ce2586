use crate::material::{MatcapChoice, MatcapMaterial};

/// Debug overlay: the matcap selector bound to the shared material, plus
/// an FPS readout. Selecting an option mutates the material immediately,
/// which retextures the text and every donut on the next frame.
pub fn draw(ctx: &egui::Context, material: Option<&mut MatcapMaterial>, fps: f32) {
    egui::Window::new("Controls")
        .default_pos(egui::pos2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{fps:.0} FPS"))
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );

            match material {
                Some(material) => {
                    let mut choice = material.choice();
                    egui::ComboBox::from_label("matcap")
                        .selected_text(choice.label())
                        .show_ui(ui, |ui| {
                            for option in MatcapChoice::ALL {
                                ui.selectable_value(&mut choice, option, option.label());
                            }
                        });
                    if choice != material.choice() {
                        material.set_choice(choice);
                    }
                }
                None => {
                    ui.label(egui::RichText::new("loading font...").color(egui::Color32::GRAY));
                }
            }
        });
}
