/// Display-list construction.
///
/// Flattens layout nodes into a small command set the rasterizer can
/// execute. Coordinates are in layout pixels; the rasterizer applies
/// the capture scale.
use crate::rendering::layout::{LayoutNode, NodeKind};
use crate::rendering::raster::LINE_HEIGHT;
use crate::Viewport;

pub const WHITE: (u8, u8, u8, u8) = (255, 255, 255, 255);
pub const INK: (u8, u8, u8, u8) = (17, 24, 39, 255);
pub const RULE_GRAY: (u8, u8, u8, u8) = (180, 180, 180, 255);
pub const SHADE_GRAY: (u8, u8, u8, u8) = (229, 231, 235, 255);

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: (u8, u8, u8, u8),
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        scale: u32,
        rgba: (u8, u8, u8, u8),
    },
}

/// Build the display list for a laid-out quote: page background first,
/// then each block in document order.
pub fn build_display_list(nodes: &[LayoutNode], viewport: Viewport) -> Vec<PaintCommand> {
    let mut commands = Vec::with_capacity(nodes.len() * 2 + 1);
    commands.push(PaintCommand::SolidRect {
        x: 0,
        y: 0,
        width: viewport.width,
        height: viewport.height,
        rgba: WHITE,
    });

    for node in nodes {
        let rect = &node.lb.rect;
        match node.kind {
            NodeKind::Rule => {
                commands.push(PaintCommand::SolidRect {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: 1,
                    rgba: RULE_GRAY,
                });
            }
            NodeKind::TableHead | NodeKind::GrandTotalRow => {
                commands.push(PaintCommand::SolidRect {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                    rgba: SHADE_GRAY,
                });
                push_text(&mut commands, node);
            }
            _ => push_text(&mut commands, node),
        }
    }

    commands
}

fn push_text(commands: &mut Vec<PaintCommand>, node: &LayoutNode) {
    let rect = &node.lb.rect;
    let padding = node.lb.box_model.padding as i32;
    for (line_no, line) in node.text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        commands.push(PaintCommand::Text {
            x: rect.x + padding,
            y: rect.y + padding + line_no as i32 * (LINE_HEIGHT * node.scale) as i32,
            text: line.to_string(),
            scale: node.scale,
            rgba: INK,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quote;
    use crate::rendering::layout::layout_quote;

    #[test]
    fn display_list_begins_with_page_background() {
        let viewport = Viewport {
            width: 400,
            height: 300,
        };
        let nodes = layout_quote(&Quote::default(), viewport);
        let commands = build_display_list(&nodes, viewport);
        match &commands[0] {
            PaintCommand::SolidRect { width, height, rgba, .. } => {
                assert_eq!((*width, *height), (400, 300));
                assert_eq!(*rgba, WHITE);
            }
            other => panic!("expected background rect, got {:?}", other),
        }
    }

    #[test]
    fn rules_paint_as_one_pixel_rects() {
        let viewport = Viewport {
            width: 400,
            height: 300,
        };
        let nodes = layout_quote(&Quote::default(), viewport);
        let commands = build_display_list(&nodes, viewport);
        assert!(commands.iter().any(|c| matches!(
            c,
            PaintCommand::SolidRect { height: 1, rgba, .. } if *rgba == RULE_GRAY
        )));
    }

    #[test]
    fn every_nonempty_text_line_is_painted() {
        let viewport = Viewport {
            width: 400,
            height: 300,
        };
        let nodes = layout_quote(&Quote::default(), viewport);
        let commands = build_display_list(&nodes, viewport);
        let texts: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                PaintCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.iter().any(|t| t.contains("QUOTATION")));
        assert!(texts.iter().any(|t| t.contains("Q-2024001")));
    }
}
