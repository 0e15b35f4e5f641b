//! Chain-code rasterization of a straight line segment via Bresenham's
//! algorithm — the inverse direction of [`crate::contour`]: here the
//! geometry is given and the chain code is derived from it, rather
//! than the other way around.

use crate::contour::ChainCode;

const DIRS8: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
const DIRS4: [(i32, i32); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

fn dir_code(dirs: &[(i32, i32)], dx: i32, dy: i32) -> u8 {
    let pos = dirs.iter().position(|&d| d == (dx.signum(), dy.signum())).expect("unreachable step direction");
    b'0' + pos as u8
}

/// 8-connected Bresenham line from `(x0,y0)` to `(x1,y1)`.
pub fn rasterize_8conn(x0: i32, y0: i32, x1: i32, y1: i32) -> ChainCode {
    rasterize_generic(x0, y0, x1, y1, &DIRS8, true)
}

/// 4-connected Bresenham line: diagonal steps are split into an
/// explicit horizontal-then-vertical pair.
pub fn rasterize_4conn(x0: i32, y0: i32, x1: i32, y1: i32) -> ChainCode {
    rasterize_generic(x0, y0, x1, y1, &DIRS4, false)
}

fn rasterize_generic(x0: i32, y0: i32, x1: i32, y1: i32, dirs: &[(i32, i32)], diag_ok: bool) -> ChainCode {
    let mut chain = ChainCode::new();
    let (mut x, mut y) = (x0, y0);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    while x != x1 || y != y1 {
        let e2 = 2 * err;
        let step_x = e2 >= dy;
        let step_y = e2 <= dx;
        if diag_ok {
            let (mx, my) = (if step_x { sx } else { 0 }, if step_y { sy } else { 0 });
            chain.push(dir_code(dirs, mx, my));
            x += mx;
            y += my;
        } else {
            if step_x {
                chain.push(dir_code(dirs, sx, 0));
                x += sx;
            }
            if step_y {
                chain.push(dir_code(dirs, 0, sy));
                y += sy;
            }
        }
        if step_x {
            err += dy;
        }
        if step_y {
            err += dx;
        }
    }
    chain
}
