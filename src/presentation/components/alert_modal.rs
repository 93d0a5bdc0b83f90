use eframe::egui;

/// Blocking message window for failures the user has to acknowledge.
pub struct AlertModal {
    show: bool,
    title: String,
    message: String,
}

impl AlertModal {
    pub fn new() -> Self {
        Self {
            show: false,
            title: String::new(),
            message: String::new(),
        }
    }

    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.show = true;
    }

    pub fn is_open(&self) -> bool {
        self.show
    }

    pub fn message(&self) -> Option<&str> {
        self.show.then_some(self.message.as_str())
    }

    pub fn close(&mut self) {
        self.show = false;
        self.message.clear();
    }

    pub fn render(&mut self, ctx: &egui::Context) {
        if !self.show {
            return;
        }

        let mut open = self.show;
        let mut dismissed = false;
        egui::Window::new(self.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .default_width(360.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    ui.label(&self.message);
                    ui.add_space(8.0);
                    ui.separator();
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if !open || dismissed {
            self.close();
        }
    }
}

impl Default for AlertModal {
    fn default() -> Self {
        Self::new()
    }
}
