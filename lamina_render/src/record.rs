// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Canvas`] that records instead of drawing.
//!
//! [`DrawList`] keeps every call as a [`DrawCommand`] and tracks the current
//! matrix the way a real backend would, stamping each clip and draw with the
//! device transform in effect. That makes it usable both as a test double
//! and as input for the exporters in `lamina_debug`.

use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use lamina_core::style::{Color, Shadow};

use crate::RenderError;
use crate::backend::{Canvas, ClipOp, FillRule, LayerPaint, Paragraph};
use crate::paint::Paint;

/// One recorded canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Canvas::save`].
    Save,
    /// [`Canvas::save_layer`].
    SaveLayer(LayerPaint),
    /// [`Canvas::restore`].
    Restore,
    /// [`Canvas::concat`].
    Concat(Affine),
    /// [`Canvas::translate`].
    Translate(Vec2),
    /// [`Canvas::clip_path`].
    ClipPath {
        /// Path in user space.
        path: BezPath,
        /// Clip operation.
        op: ClipOp,
        /// Device transform at the time of the call.
        transform: Affine,
    },
    /// [`Canvas::clip_rect`].
    ClipRect {
        /// Rectangle in user space.
        rect: Rect,
        /// Clip operation.
        op: ClipOp,
        /// Device transform at the time of the call.
        transform: Affine,
    },
    /// [`Canvas::draw_path`].
    DrawPath {
        /// Path in user space.
        path: BezPath,
        /// Fill rule.
        fill_rule: FillRule,
        /// Paint.
        paint: Paint,
        /// Device transform at the time of the call.
        transform: Affine,
    },
    /// [`Canvas::draw_rect`].
    DrawRect {
        /// Rectangle in user space.
        rect: Rect,
        /// Paint.
        paint: Paint,
        /// Device transform at the time of the call.
        transform: Affine,
    },
    /// [`Canvas::draw_paragraph`].
    DrawParagraph {
        /// Paragraph.
        paragraph: Paragraph,
        /// Top-left corner in user space.
        origin: Point,
        /// Paint.
        paint: Paint,
        /// Text shadows.
        shadows: Vec<Shadow>,
        /// Device transform at the time of the call.
        transform: Affine,
    },
    /// [`Canvas::clear`].
    Clear(Color),
}

impl DrawCommand {
    /// Whether the command puts pixels on the surface.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::DrawPath { .. } | Self::DrawRect { .. } | Self::DrawParagraph { .. }
        )
    }
}

/// Recording canvas.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    matrix: Affine,
    stack: Vec<Affine>,
    flushes: u32,
}

impl DrawList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of commands that draw.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    /// Current save depth. Zero after a balanced pass.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Current device transform.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.matrix
    }

    /// How often [`Canvas::flush`] was called.
    #[must_use]
    pub fn flushes(&self) -> u32 {
        self.flushes
    }

    /// Drops all commands and resets the matrix.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
        self.matrix = Affine::IDENTITY;
        self.stack.clear();
    }
}

impl Canvas for DrawList {
    fn save(&mut self) {
        self.stack.push(self.matrix);
        self.commands.push(DrawCommand::Save);
    }

    fn save_layer(&mut self, paint: &LayerPaint) {
        self.stack.push(self.matrix);
        self.commands.push(DrawCommand::SaveLayer(*paint));
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(matrix) => self.matrix = matrix,
            None => log::warn!("restore without matching save"),
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn concat(&mut self, transform: Affine) {
        self.matrix *= transform;
        self.commands.push(DrawCommand::Concat(transform));
    }

    fn translate(&mut self, offset: Vec2) {
        self.matrix *= Affine::translate(offset);
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn clip_path(&mut self, path: &BezPath, op: ClipOp) {
        self.commands.push(DrawCommand::ClipPath {
            path: path.clone(),
            op,
            transform: self.matrix,
        });
    }

    fn clip_rect(&mut self, rect: Rect, op: ClipOp) {
        self.commands.push(DrawCommand::ClipRect {
            rect,
            op,
            transform: self.matrix,
        });
    }

    fn draw_path(&mut self, path: &BezPath, fill_rule: FillRule, paint: &Paint) {
        self.commands.push(DrawCommand::DrawPath {
            path: path.clone(),
            fill_rule,
            paint: paint.clone(),
            transform: self.matrix,
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::DrawRect {
            rect,
            paint: paint.clone(),
            transform: self.matrix,
        });
    }

    fn draw_paragraph(
        &mut self,
        paragraph: &Paragraph,
        origin: Point,
        paint: &Paint,
        shadows: &[Shadow],
    ) {
        self.commands.push(DrawCommand::DrawParagraph {
            paragraph: paragraph.clone(),
            origin,
            paint: paint.clone(),
            shadows: shadows.to_vec(),
            transform: self.matrix,
        });
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn flush(&mut self) -> Result<(), RenderError> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Shape;

    use super::*;

    #[test]
    fn draws_carry_current_matrix() {
        let mut list = DrawList::new();
        list.save();
        list.concat(Affine::translate((10.0, 20.0)));
        list.translate(Vec2::new(1.0, 1.0));
        list.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0), &Paint::solid(Color::BLACK));
        list.restore();
        list.draw_path(
            &Rect::new(0.0, 0.0, 1.0, 1.0).to_path(0.1),
            FillRule::NonZero,
            &Paint::solid(Color::BLACK),
        );

        let transforms: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DrawRect { transform, .. } | DrawCommand::DrawPath { transform, .. } => {
                    Some(*transform)
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            transforms,
            [Affine::translate((11.0, 21.0)), Affine::IDENTITY]
        );
        assert_eq!(list.depth(), 0);
        assert_eq!(list.draw_count(), 2);
    }

    #[test]
    fn unbalanced_restore_keeps_identity() {
        let mut list = DrawList::new();
        list.restore();
        assert_eq!(list.matrix(), Affine::IDENTITY);
        assert_eq!(list.depth(), 0);
    }
}
