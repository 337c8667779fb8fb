#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::Path;

use crop_window::{Corner, CropShape, Cropper, DragHandle, Edge, GuidelineMode, Rect};
use eframe::egui;
use image::DynamicImage;

#[derive(Clone, Copy, Debug, PartialEq)]
enum AspectRatioMode {
    Free,
    Original,
    Square,
    // Landscape
    R3_2,
    R4_3,
    R16_9,
    R16_10,
    // Portrait
    R2_3,
    R3_4,
    R9_16,
    R10_16,
    Custom,
}

impl Default for AspectRatioMode {
    fn default() -> Self {
        Self::Free
    }
}

impl AspectRatioMode {
    fn counterpart(&self) -> Self {
        match self {
            AspectRatioMode::R3_2 => AspectRatioMode::R2_3,
            AspectRatioMode::R4_3 => AspectRatioMode::R3_4,
            AspectRatioMode::R16_9 => AspectRatioMode::R9_16,
            AspectRatioMode::R16_10 => AspectRatioMode::R10_16,
            AspectRatioMode::R2_3 => AspectRatioMode::R3_2,
            AspectRatioMode::R3_4 => AspectRatioMode::R4_3,
            AspectRatioMode::R9_16 => AspectRatioMode::R16_9,
            AspectRatioMode::R10_16 => AspectRatioMode::R16_10,
            _ => *self,
        }
    }

    /// Ratio terms to lock, or `None` for a free window.
    fn terms(&self, image: Option<&DynamicImage>, custom: (u32, u32)) -> Option<(i32, i32)> {
        match self {
            AspectRatioMode::Free => None,
            AspectRatioMode::Original => image.map(|img| (img.width() as i32, img.height() as i32)),
            AspectRatioMode::Square => Some((1, 1)),
            AspectRatioMode::R3_2 => Some((3, 2)),
            AspectRatioMode::R4_3 => Some((4, 3)),
            AspectRatioMode::R16_9 => Some((16, 9)),
            AspectRatioMode::R16_10 => Some((16, 10)),
            AspectRatioMode::R2_3 => Some((2, 3)),
            AspectRatioMode::R3_4 => Some((3, 4)),
            AspectRatioMode::R9_16 => Some((9, 16)),
            AspectRatioMode::R10_16 => Some((10, 16)),
            AspectRatioMode::Custom => Some((custom.0 as i32, custom.1 as i32)),
        }
    }
}

impl std::fmt::Display for AspectRatioMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AspectRatioMode::Free => "Free",
            AspectRatioMode::Original => "Original",
            AspectRatioMode::Square => "1:1",
            AspectRatioMode::R3_2 => "3:2",
            AspectRatioMode::R4_3 => "4:3",
            AspectRatioMode::R16_9 => "16:9",
            AspectRatioMode::R16_10 => "16:10",
            AspectRatioMode::R2_3 => "2:3",
            AspectRatioMode::R3_4 => "3:4",
            AspectRatioMode::R9_16 => "9:16",
            AspectRatioMode::R10_16 => "10:16",
            AspectRatioMode::Custom => "Custom",
        };
        write!(f, "{}", s)
    }
}

#[derive(Default)]
struct CropWindowApp {
    cropper: Cropper,
    texture: Option<egui::TextureHandle>,
    aspect_ratio_mode: AspectRatioMode,
    custom_w: u32,
    custom_h: u32,
    is_portrait: bool,
    status: Option<String>,
}

fn to_screen(origin: egui::Pos2, rect: Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        origin + egui::vec2(rect.left, rect.top),
        origin + egui::vec2(rect.right, rect.bottom),
    )
}

fn cursor_icon(handle: DragHandle) -> egui::CursorIcon {
    match handle {
        DragHandle::MoveWindow => egui::CursorIcon::Grabbing,
        DragHandle::ResizeCorner(Corner::TopLeft | Corner::BottomRight) => {
            egui::CursorIcon::ResizeNwSe
        }
        DragHandle::ResizeCorner(Corner::TopRight | Corner::BottomLeft) => {
            egui::CursorIcon::ResizeNeSw
        }
        DragHandle::ResizeEdge(Edge::Left | Edge::Right) => egui::CursorIcon::ResizeHorizontal,
        DragHandle::ResizeEdge(Edge::Top | Edge::Bottom) => egui::CursorIcon::ResizeVertical,
    }
}

impl CropWindowApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            custom_w: 4,
            custom_h: 3,
            is_portrait: false,
            ..Default::default()
        }
    }

    fn open_image(&mut self, ctx: &egui::Context, path: &Path) {
        match image::open(path) {
            Ok(img) => {
                self.cropper.set_source_image(img);
                self.load_texture(ctx);
                self.apply_aspect_ratio();
                self.status = None;
            }
            Err(e) => {
                tracing::error!("Failed to open {}: {}", path.display(), e);
                self.status = Some(format!("Failed to open image: {e}"));
            }
        }
    }

    fn open_mask(&mut self, path: &Path) {
        let result = image::open(path)
            .map_err(anyhow::Error::from)
            .and_then(|mask| Ok(self.cropper.set_mask_buffer(mask.to_rgba8())?))
            .and_then(|_| Ok(self.cropper.set_crop_shape(CropShape::Mask)?));
        if let Err(e) = result {
            tracing::error!("Failed to load mask {}: {}", path.display(), e);
            self.status = Some(format!("Failed to load mask: {e}"));
        }
    }

    fn load_texture(&mut self, ctx: &egui::Context) {
        if let Some(image) = self.cropper.source_image() {
            let size = [image.width() as _, image.height() as _];
            let image_buffer = image.to_rgba8();
            let pixels = image_buffer.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            self.texture =
                Some(ctx.load_texture("image", color_image, egui::TextureOptions::LINEAR));
        }
    }

    fn apply_aspect_ratio(&mut self) {
        let terms = self.aspect_ratio_mode.terms(
            self.cropper.source_image(),
            (self.custom_w, self.custom_h),
        );
        let result = match terms {
            Some((numerator, denominator)) => self
                .cropper
                .set_aspect_ratio(numerator, denominator)
                .and_then(|_| self.cropper.set_aspect_lock_enabled(true)),
            None => self.cropper.set_aspect_lock_enabled(false),
        };
        if let Err(e) = result {
            self.status = Some(e.to_string());
        }
    }

    fn save_cropped(&mut self, path: &Path) -> anyhow::Result<()> {
        let cropped = DynamicImage::ImageRgba8(self.cropper.cropped_image()?);
        let is_jpeg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));
        if is_jpeg {
            // JPEG carries no alpha channel.
            DynamicImage::ImageRgb8(cropped.to_rgb8()).save(path)?;
        } else {
            cropped.save(path)?;
        }
        tracing::info!("Saved cropped image to {}", path.display());
        Ok(())
    }

    fn toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label("Aspect Ratio:");
            let mut changed = false;
            egui::ComboBox::from_id_salt("params_aspect_ratio")
                .selected_text(format!("{}", self.aspect_ratio_mode))
                .show_ui(ui, |ui| {
                    let mut modes = vec![
                        AspectRatioMode::Free,
                        AspectRatioMode::Original,
                        AspectRatioMode::Square,
                    ];
                    if !self.is_portrait {
                        modes.extend([
                            AspectRatioMode::R3_2,
                            AspectRatioMode::R4_3,
                            AspectRatioMode::R16_9,
                            AspectRatioMode::R16_10,
                        ]);
                    } else {
                        modes.extend([
                            AspectRatioMode::R2_3,
                            AspectRatioMode::R3_4,
                            AspectRatioMode::R9_16,
                            AspectRatioMode::R10_16,
                        ]);
                    }
                    modes.push(AspectRatioMode::Custom);
                    for mode in modes {
                        changed |= ui
                            .selectable_value(&mut self.aspect_ratio_mode, mode, mode.to_string())
                            .changed();
                    }
                });

            if ui.button("🔄").on_hover_text("Portrait / landscape").clicked() {
                self.is_portrait = !self.is_portrait;
                if self.aspect_ratio_mode == AspectRatioMode::Custom {
                    std::mem::swap(&mut self.custom_w, &mut self.custom_h);
                } else {
                    self.aspect_ratio_mode = self.aspect_ratio_mode.counterpart();
                }
                changed = true;
            }

            if self.aspect_ratio_mode == AspectRatioMode::Custom {
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut self.custom_w)
                            .speed(0.1)
                            .range(1..=100),
                    )
                    .changed();
                ui.label(":");
                changed |= ui
                    .add(
                        egui::DragValue::new(&mut self.custom_h)
                            .speed(0.1)
                            .range(1..=100),
                    )
                    .changed();
            }

            if changed {
                self.apply_aspect_ratio();
            }

            ui.separator();
            ui.label("Shape:");
            let mut shape = self.cropper.config().shape;
            egui::ComboBox::from_id_salt("params_shape")
                .selected_text(shape.to_string())
                .show_ui(ui, |ui| {
                    for s in [CropShape::Rect, CropShape::Oval, CropShape::Mask] {
                        ui.selectable_value(&mut shape, s, s.to_string());
                    }
                });
            if shape != self.cropper.config().shape {
                if let Err(e) = self.cropper.set_crop_shape(shape) {
                    self.status = Some(e.to_string());
                }
            }
            if ui.button("Load Mask").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image", &["png", "bmp"])
                    .pick_file()
                {
                    self.open_mask(&path);
                }
            }

            ui.separator();
            ui.label("Guidelines:");
            let mut guidelines = self.cropper.config().guidelines;
            egui::ComboBox::from_id_salt("params_guidelines")
                .selected_text(guidelines.to_string())
                .show_ui(ui, |ui| {
                    for g in [GuidelineMode::Off, GuidelineMode::On, GuidelineMode::OnResize] {
                        ui.selectable_value(&mut guidelines, g, g.to_string());
                    }
                });
            self.cropper.set_guideline_mode(guidelines);

            ui.separator();
            if ui.button("⟳ 90°").clicked() {
                match self.cropper.rotate(90) {
                    Ok(()) => {
                        self.load_texture(ctx);
                        if self.aspect_ratio_mode == AspectRatioMode::Original {
                            self.apply_aspect_ratio();
                        }
                    }
                    Err(e) => self.status = Some(e.to_string()),
                }
            }
            if ui.button("Reset").clicked() {
                self.cropper.reset_crop_window();
            }

            if ui.button("Save Cropped Image").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image", &["png", "jpg", "jpeg", "bmp"])
                    .save_file()
                {
                    if let Err(e) = self.save_cropped(&path) {
                        tracing::error!("Failed to save image: {}", e);
                        self.status = Some(format!("Failed to save image: {e}"));
                    }
                }
            }
        });
    }
}

impl eframe::App for CropWindowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle dropped files
        if !ctx.input(|i| i.raw.dropped_files.is_empty()) {
            let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
            if let Some(path) = dropped_files.first().and_then(|f| f.path.clone()) {
                self.open_image(ctx, &path);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if ui.button("Open Image").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image", &["png", "jpg", "jpeg", "bmp"])
                    .pick_file()
                {
                    self.open_image(ctx, &path);
                }
            }

            if self.texture.is_some() {
                self.toolbar(ui, ctx);
                if let Some(status) = &self.status {
                    ui.colored_label(egui::Color32::LIGHT_RED, status);
                }
                ui.separator();
            }

            let Some(texture) = &self.texture else {
                return;
            };

            const PADDING: f32 = 20.0;
            let available = ui.available_rect_before_wrap();
            let response = ui.allocate_rect(available, egui::Sense::drag());
            let painter = ui.painter_at(available);

            // Overlay space starts at the padded view origin.
            let view = available.shrink(PADDING);
            let origin = view.min;
            let display = match self.cropper.layout_view(view.width(), view.height()) {
                Ok(rect) => rect,
                Err(e) => {
                    self.status = Some(e.to_string());
                    return;
                }
            };
            let image_rect = to_screen(origin, display);

            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            // Handle Input
            let to_overlay = |pos: egui::Pos2| pos - origin;
            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let p = to_overlay(pos);
                    self.cropper.on_pointer_down(p.x, p.y);
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let p = to_overlay(pos);
                    self.cropper.on_pointer_move(p.x, p.y);
                }
            }
            if self.cropper.is_dragging() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.cropper.on_pointer_cancel();
            }
            if let Some(handle) = self.cropper.active_handle() {
                ctx.set_cursor_icon(cursor_icon(handle));
            }
            if response.drag_stopped() {
                self.cropper.on_pointer_up();
            }

            let screen_crop_rect = to_screen(origin, self.cropper.edges().to_rect());

            // Draw overlay (dimmed area outside crop)
            let overlay_color = egui::Color32::from_black_alpha(150);
            for dim in [
                egui::Rect::from_min_max(
                    image_rect.min,
                    egui::pos2(image_rect.max.x, screen_crop_rect.min.y),
                ),
                egui::Rect::from_min_max(
                    egui::pos2(image_rect.min.x, screen_crop_rect.max.y),
                    image_rect.max,
                ),
                egui::Rect::from_min_max(
                    egui::pos2(image_rect.min.x, screen_crop_rect.min.y),
                    egui::pos2(screen_crop_rect.min.x, screen_crop_rect.max.y),
                ),
                egui::Rect::from_min_max(
                    egui::pos2(screen_crop_rect.max.x, screen_crop_rect.min.y),
                    egui::pos2(image_rect.max.x, screen_crop_rect.max.y),
                ),
            ] {
                painter.rect_filled(dim, 0.0, overlay_color);
            }

            if self.cropper.guidelines_visible() {
                let stroke = egui::Stroke::new(1.0, egui::Color32::from_white_alpha(120));
                let r = screen_crop_rect;
                for i in 1..3 {
                    let t = i as f32 / 3.0;
                    let x = egui::lerp(r.min.x..=r.max.x, t);
                    let y = egui::lerp(r.min.y..=r.max.y, t);
                    painter.line_segment([egui::pos2(x, r.min.y), egui::pos2(x, r.max.y)], stroke);
                    painter.line_segment([egui::pos2(r.min.x, y), egui::pos2(r.max.x, y)], stroke);
                }
            }

            if self.cropper.config().shape == CropShape::Oval {
                let center = screen_crop_rect.center();
                let radius = screen_crop_rect.size() / 2.0;
                let points = (0..64)
                    .map(|i| {
                        let theta = i as f32 / 64.0 * std::f32::consts::TAU;
                        center + egui::vec2(radius.x * theta.cos(), radius.y * theta.sin())
                    })
                    .collect();
                painter.add(egui::Shape::closed_line(
                    points,
                    egui::Stroke::new(1.0, egui::Color32::YELLOW),
                ));
            }

            // Draw crop border
            painter.rect_stroke(
                screen_crop_rect,
                0.0,
                egui::Stroke::new(1.0, egui::Color32::WHITE),
            );

            // Draw handles
            let handle_radius = 6.0;
            let handle_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);
            let handle_fill = egui::Color32::WHITE;

            let handles = [
                screen_crop_rect.min,
                screen_crop_rect.max,
                egui::pos2(screen_crop_rect.min.x, screen_crop_rect.max.y),
                egui::pos2(screen_crop_rect.max.x, screen_crop_rect.min.y),
                screen_crop_rect.center_top(),
                screen_crop_rect.center_bottom(),
                screen_crop_rect.left_center(),
                screen_crop_rect.right_center(),
            ];

            for pos in handles {
                painter.circle(pos, handle_radius, handle_fill, handle_stroke);
            }
        });
    }
}

fn main() -> anyhow::Result<()> {
    crop_window::init_logging()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Crop Window",
        options,
        Box::new(|cc| Ok(Box::new(CropWindowApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
