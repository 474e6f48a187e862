//! ASCII tile previews used by sampling tooling
//!
//! Legend:
//! `.` off-piste, `P` piste, `S` steep piste, `#` cliff, `=` service road,
//! `T` tree, `o` rock, `W` halfpipe wall, `K` kicker, `J` rail,
//! `R`/`B` red or blue gate pole

use crate::course::Course;
use crate::layout::{FeatureKind, GateColor, ObstacleKind};

/// Tile grid of a course, row by row, top of the run first
pub fn render_tiles(course: &Course) -> Vec<Vec<char>> {
    let level = &course.level;
    let geometry = &course.geometry;
    let (width, height) = (level.width as usize, level.height as usize);

    let steep_rows: Vec<(usize, usize)> = level
        .steep_zones
        .iter()
        .map(|z| {
            let h = level.height as f32;
            ((z.start_y * h).floor() as usize, (z.end_y * h).floor() as usize)
        })
        .collect();

    let mut grid: Vec<Vec<char>> = (0..height)
        .map(|y| {
            let steep = steep_rows.iter().any(|&(s, e)| y >= s && y < e);
            (0..width)
                .map(|x| {
                    let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
                    if geometry.is_in_piste(cx, cy) {
                        if steep { 'S' } else { 'P' }
                    } else if geometry.is_on_cliff(cx, cy) {
                        '#'
                    } else if geometry.is_on_access_path(cx, cy) {
                        '='
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect();

    let mut stamp = |x: i32, y: i32, c: char| {
        if x >= 0 && y >= 0 {
            if let Some(cell) = grid.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
                *cell = c;
            }
        }
    };

    for obstacle in &course.obstacles {
        let c = match obstacle.kind {
            ObstacleKind::Tree => 'T',
            ObstacleKind::Rock => 'o',
        };
        stamp(obstacle.x, obstacle.y, c);
    }
    for wall in &course.halfpipe_walls {
        stamp(wall.x, wall.y, 'W');
    }
    for feature in &course.features {
        let c = match feature.kind {
            FeatureKind::Kicker => 'K',
            FeatureKind::Rail => 'J',
        };
        for tile in feature.tiles() {
            stamp(tile.x, tile.y, c);
        }
    }
    for gate in &course.gates {
        let c = match gate.color {
            GateColor::Red => 'R',
            GateColor::Blue => 'B',
        };
        stamp(gate.left_x.floor() as i32, gate.y as i32, c);
        stamp(gate.right_x.floor() as i32, gate.y as i32, c);
    }

    grid
}

/// One-line description of a course
pub fn summary(course: &Course) -> String {
    let level = &course.level;
    let mut line = format!(
        "#{} {} [{}] {} {}x{} pw {:.0}% time {}s",
        level.id,
        level.name,
        level.rank,
        level.piste_shape.as_str(),
        level.width,
        level.height,
        level.piste_width * 100.0,
        level.time_limit
    );
    if level.is_park {
        let features: Vec<&str> = level.special_features.iter().map(|f| f.as_str()).collect();
        line.push_str(&format!(" park {}", features.join("+")));
    }
    if !level.steep_zones.is_empty() {
        let slopes: Vec<String> = level.steep_zones.iter().map(|z| format!("{:.0}°", z.slope)).collect();
        line.push_str(&format!(" steep {}", slopes.join(",")));
    }
    if let Some(spec) = level.slalom_gates {
        line.push_str(&format!(" slalom {}g w{:.1}", spec.count, spec.width));
    }
    if level.has_winch {
        line.push_str(&format!(" winch x{}", level.winch_anchors.len()));
    }
    line
}

/// Summary line followed by the tile grid
pub fn render_ascii(course: &Course) -> String {
    let mut out = summary(course);
    out.push('\n');
    for row in render_tiles(course) {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Rank;
    use crate::settings::GeneratorSettings;

    #[test]
    fn test_grid_matches_level_size() {
        let course = Course::from_seed(10, Rank::Red, &GeneratorSettings::default()).unwrap();
        let grid = render_tiles(&course);
        assert_eq!(grid.len(), course.level.height as usize);
        assert!(grid.iter().all(|row| row.len() == course.level.width as usize));
        assert!(grid.iter().flatten().any(|&c| c == '#'));
        assert!(grid.iter().flatten().any(|&c| c == 'R'));
    }

    #[test]
    fn test_ascii_starts_with_summary() {
        let course = Course::from_seed(10, Rank::Green, &GeneratorSettings::default()).unwrap();
        let text = render_ascii(&course);
        let first = text.lines().next().unwrap_or_default();
        assert!(first.starts_with(&format!("#{}", course.level.id)));
        assert_eq!(text.lines().count(), course.level.height as usize + 1);
    }

    #[test]
    fn test_summary_lists_gates() {
        let course = Course::from_seed(10, Rank::Red, &GeneratorSettings::default()).unwrap();
        let line = summary(&course);
        let spec = course.level.slalom_gates.unwrap();
        assert!(line.contains(&format!(" slalom {}g w{:.1}", spec.count, spec.width)));
        assert!(!line.contains('\n'));
    }
}
