use super::widget_layout_manager::{DropSide, WidgetLayoutManager};
use crate::domain::entities::WidgetName;
use chrono::{Datelike, Local, NaiveDate};
use eframe::egui;

pub enum WidgetAction {
    Hide(WidgetName),
    Show(WidgetName),
    DragStart(WidgetName),
    DragOver(WidgetName, DropSide),
    DragEnd,
}

struct TodoItem {
    done: bool,
    text: String,
}

/// Content of the personal widgets. Placement comes from the
/// [`WidgetLayoutManager`]; this only draws.
pub struct WidgetBoard {
    notes: String,
    todos: Vec<TodoItem>,
    new_todo: String,
    links: Vec<(String, String)>,
}

impl WidgetBoard {
    pub fn new(portal_root: &str) -> Self {
        let links = [
            ("Applicants", "applicants"),
            ("Employers", "employers"),
            ("Job postings", "jobs"),
            ("Reports", "reports"),
        ]
        .into_iter()
        .map(|(title, path)| (title.to_string(), format!("{}/{}", portal_root, path)))
        .collect();

        Self {
            notes: String::new(),
            todos: Vec::new(),
            new_todo: String::new(),
            links,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, manager: &WidgetLayoutManager) -> Vec<WidgetAction> {
        let mut actions = Vec::new();
        let layout = manager.layout();

        let hidden: Vec<WidgetName> = manager
            .displayed_order()
            .iter()
            .copied()
            .filter(|name| !layout.is_visible(*name))
            .collect();
        if !hidden.is_empty() {
            ui.horizontal_wrapped(|ui| {
                ui.weak("Hidden:");
                for name in hidden {
                    if ui.button(format!("+ {}", name.title())).clicked() {
                        actions.push(WidgetAction::Show(name));
                    }
                }
            });
            ui.separator();
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for name in manager.displayed_order().iter().copied() {
                    if !layout.is_visible(name) {
                        continue;
                    }
                    let card = egui::Frame::group(ui.style())
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                let handle = ui
                                    .dnd_drag_source(egui::Id::new(("widget", name.key())), name, |ui| {
                                        ui.label("☰");
                                    })
                                    .response;
                                if handle.drag_started() {
                                    actions.push(WidgetAction::DragStart(name));
                                }
                                ui.strong(name.title());
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.small_button("Hide").clicked() {
                                            actions.push(WidgetAction::Hide(name));
                                        }
                                    },
                                );
                            });
                            ui.separator();
                            self.show_content(ui, name);
                        })
                        .response;

                    if manager.dragging().is_some_and(|dragged| dragged != name)
                        && card.dnd_hover_payload::<WidgetName>().is_some()
                    {
                        if let Some(pointer) = ui.ctx().pointer_hover_pos() {
                            let side = if pointer.y > card.rect.center().y {
                                DropSide::After
                            } else {
                                DropSide::Before
                            };
                            actions.push(WidgetAction::DragOver(name, side));
                        }
                    }
                    ui.add_space(6.0);
                }
            });

        if manager.dragging().is_some()
            && !egui::DragAndDrop::has_payload_of_type::<WidgetName>(ui.ctx())
        {
            actions.push(WidgetAction::DragEnd);
        }

        actions
    }

    fn show_content(&mut self, ui: &mut egui::Ui, name: WidgetName) {
        match name {
            WidgetName::Clock => {
                let now = Local::now();
                ui.heading(now.format("%H:%M:%S").to_string());
                ui.weak(now.format("%A, %B %-d, %Y").to_string());
            }
            WidgetName::Calendar => show_month(ui, Local::now().date_naive()),
            WidgetName::Notes => {
                ui.add(
                    egui::TextEdit::multiline(&mut self.notes)
                        .hint_text("Jot something down…")
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                );
            }
            WidgetName::TodoList => {
                self.todos.retain_mut(|item| {
                    let mut keep = true;
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut item.done, &item.text);
                        if ui.small_button("✕").clicked() {
                            keep = false;
                        }
                    });
                    keep
                });
                ui.horizontal(|ui| {
                    let response = ui.text_edit_singleline(&mut self.new_todo);
                    let submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (ui.button("Add").clicked() || submitted) && !self.new_todo.trim().is_empty() {
                        self.todos.push(TodoItem {
                            done: false,
                            text: self.new_todo.trim().to_string(),
                        });
                        self.new_todo.clear();
                    }
                });
            }
            WidgetName::QuickLinks => {
                for (title, url) in &self.links {
                    ui.hyperlink_to(title, url);
                }
            }
            WidgetName::Announcements => {
                ui.weak("No announcements right now.");
            }
        }
    }
}

fn show_month(ui: &mut egui::Ui, today: NaiveDate) {
    ui.label(today.format("%B %Y").to_string());
    let Some(first) = today.with_day(1) else {
        return;
    };
    let offset = first.weekday().num_days_from_sunday() as usize;
    let days = (28..=31)
        .rev()
        .find(|day| today.with_day(*day).is_some())
        .unwrap_or(28);

    egui::Grid::new("calendar_widget").striped(false).show(ui, |ui| {
        for label in ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"] {
            ui.weak(label);
        }
        ui.end_row();

        for cell in 0..offset + days as usize {
            if cell < offset {
                ui.label("");
            } else {
                let day = (cell - offset + 1) as u32;
                let text = egui::RichText::new(day.to_string());
                if day == today.day() {
                    ui.label(text.strong().underline());
                } else {
                    ui.label(text);
                }
            }
            if cell % 7 == 6 {
                ui.end_row();
            }
        }
    });
}
