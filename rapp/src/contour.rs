//! Outer boundary tracing (Moore-neighbor tracing) and chain-code
//! output, for the first connected component found in raster order.

use crate::error::{RappError, RappResult};
use crate::image::BinImageView;
use crate::pixel::pixel_get_bin;

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

/// A chain code: a sequence of direction digits (`'0'..='7'` for
/// 8-connectivity, `'0'..='3'` for 4-connectivity).
pub type ChainCode = Vec<u8>;

/// Traces one closed loop starting at `(sx, sy)` with initial
/// "came-from" direction `back_dir`, marking every pixel it steps onto
/// in `visited` so a following re-entry pass won't retrace it.
fn trace_loop(
    get: &impl Fn(usize, usize) -> bool,
    visited: &mut [Vec<bool>],
    w: usize,
    h: usize,
    dirs: &[(i32, i32)],
    (sx, sy): (usize, usize),
    mut back_dir: usize,
) -> ChainCode {
    let ndir = dirs.len();
    let (mut cx, mut cy) = (sx as i32, sy as i32);
    let mut chain = ChainCode::new();

    loop {
        let mut found = None;
        for i in 1..=ndir {
            let cand = (back_dir + i) % ndir;
            let (dx, dy) = dirs[cand];
            let (nx, ny) = (cx + dx, cy + dy);
            if nx >= 0 && ny >= 0 && (nx as usize) < w && (ny as usize) < h && get(nx as usize, ny as usize) {
                found = Some((cand, nx, ny));
                break;
            }
        }
        let Some((dir, nx, ny)) = found else {
            // An isolated single pixel with no set neighbour: the
            // boundary is that one pixel, zero-length chain.
            break;
        };
        chain.push(b'0' + dir as u8);
        back_dir = (dir + ndir / 2) % ndir;
        cx = nx;
        cy = ny;
        visited[cy as usize][cx as usize] = true;
        if (cx, cy) == (sx as i32, sy as i32) {
            break;
        }
    }
    chain
}

/// Looks for a second, not-yet-visited boundary leaving `(sx, sy)`,
/// scanning candidate directions in the opposite rotational order from
/// the first loop's search. This is what picks up a re-entry chain for
/// a component that touches itself (e.g. a "C" shape) — the first loop
/// alone only traces the outer boundary up to the point it closes.
fn find_reentry_dir(
    get: &impl Fn(usize, usize) -> bool,
    visited: &[Vec<bool>],
    w: usize,
    h: usize,
    dirs: &[(i32, i32)],
    (sx, sy): (usize, usize),
) -> Option<usize> {
    let ndir = dirs.len();
    let w_code = dirs.iter().position(|&d| d == (-1, 0)).unwrap();
    for i in 1..=ndir {
        let cand = (w_code + ndir - i) % ndir;
        let (dx, dy) = dirs[cand];
        let (nx, ny) = (sx as i32 + dx, sy as i32 + dy);
        if nx >= 0 && ny >= 0 && (nx as usize) < w && (ny as usize) < h {
            let (nx, ny) = (nx as usize, ny as usize);
            if get(nx, ny) && !visited[ny][nx] {
                return Some(cand);
            }
        }
    }
    None
}

fn trace(
    get: impl Fn(usize, usize) -> bool,
    w: usize,
    h: usize,
    dirs: &[(i32, i32)],
) -> Option<(usize, usize, ChainCode)> {
    let mut start = None;
    'outer: for y in 0..h {
        for x in 0..w {
            if get(x, y) {
                start = Some((x, y));
                break 'outer;
            }
        }
    }
    let (sx, sy) = start?;
    let w_code = dirs.iter().position(|&d| d == (-1, 0)).unwrap();
    let mut visited = vec![vec![false; w]; h];
    visited[sy][sx] = true;

    let mut chain = trace_loop(&get, &mut visited, w, h, dirs, (sx, sy), w_code);

    // Repeat the search to the right of where the first loop closed to
    // pick up any re-entry chain the first pass didn't cover.
    if let Some(dir2) = find_reentry_dir(&get, &visited, w, h, dirs, (sx, sy)) {
        let chain2 = trace_loop(&get, &mut visited, w, h, dirs, (sx, sy), dir2);
        chain.extend(chain2);
    }

    Some((sx, sy, chain))
}

/// Traces the outer boundary of the first (in raster order) connected
/// component using 4-connectivity. Returns `(origin_x, origin_y,
/// length)`; if `out` is non-empty, also writes the chain code into it
/// (truncated to `out`'s capacity — callers who only want the length
/// can pass an empty slice).
pub fn contour_4conn_bin(img: &BinImageView, out: &mut [u8]) -> RappResult<(usize, usize, usize)> {
    contour_generic(img, out, &DIRS4)
}

pub fn contour_8conn_bin(img: &BinImageView, out: &mut [u8]) -> RappResult<(usize, usize, usize)> {
    contour_generic(img, out, &DIRS8)
}

fn contour_generic(img: &BinImageView, out: &mut [u8], dirs: &[(i32, i32)]) -> RappResult<(usize, usize, usize)> {
    crate::state::check_initialized()?;
    let off = img.off as usize;
    let rows: Vec<Vec<u8>> = (0..img.h).map(|y| img.row(y).to_vec()).collect();
    let get = |x: usize, y: usize| pixel_get_bin(&rows[y], off + x) != 0;
    let Some((ox, oy, chain)) = trace(get, img.w, img.h, dirs) else {
        return Err(RappError::BadParameter);
    };
    let n = chain.len().min(out.len());
    out[..n].copy_from_slice(&chain[..n]);
    Ok((ox, oy, chain.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::{align, AlignedBuffer};
    use crate::image::row_bytes;
    use crate::pixel::pixel_set_bin;

    fn square(w: usize, h: usize) -> (AlignedBuffer, usize) {
        let dim = align(row_bytes(w, 0));
        let mut buf = AlignedBuffer::new(dim * h).unwrap();
        for y in 0..h {
            for x in 0..w {
                pixel_set_bin(&mut buf.as_mut_slice()[y * dim..y * dim + dim], x, 1);
            }
        }
        (buf, dim)
    }

    #[test]
    fn contour_8conn_3x3_square_closes_and_starts_at_origin() {
        crate::state::initialize();
        let (buf, dim) = square(3, 3);
        let img = BinImageView::new(buf.as_slice(), dim, 0, 3, 3).unwrap();
        let mut code = [0u8; 32];
        let (ox, oy, len) = contour_8conn_bin(&img, &mut code).unwrap();
        assert_eq!((ox, oy), (0, 0));
        assert!(len > 0 && len <= code.len());

        // Replaying the chain code from the origin must land back on
        // the origin, and every intermediate pixel visited must be
        // set (the trace never steps onto background).
        let off = img.off as usize;
        let rows: Vec<Vec<u8>> = (0..img.h).map(|y| img.row(y).to_vec()).collect();
        let get = |x: i32, y: i32| {
            x >= 0 && y >= 0 && (x as usize) < img.w && (y as usize) < img.h && pixel_get_bin(&rows[y as usize], off + x as usize) != 0
        };
        let (mut x, mut y) = (ox as i32, oy as i32);
        for &c in &code[..len] {
            let dir = (c - b'0') as usize;
            let (dx, dy) = DIRS8[dir];
            x += dx;
            y += dy;
            assert!(get(x, y), "chain code steps onto background at ({x},{y})");
        }
        assert_eq!((x, y), (ox as i32, oy as i32));
    }

    #[test]
    fn contour_8conn_pinch_point_covers_both_arms_via_reentry() {
        // Two 1x1 squares touching only diagonally at (1,1): one
        // 8-connected component, but the Moore trace around it closes
        // back at the origin before covering the second arm, so a
        // re-entry pass starting over from the origin is required to
        // pick up the rest of the boundary.
        crate::state::initialize();
        let w = 3;
        let h = 3;
        let dim = align(row_bytes(w, 0));
        let mut buf = AlignedBuffer::new(dim * h).unwrap();
        for &(x, y) in &[(0usize, 0usize), (1, 1), (2, 2)] {
            pixel_set_bin(&mut buf.as_mut_slice()[y * dim..y * dim + dim], x, 1);
        }
        let img = BinImageView::new(buf.as_slice(), dim, 0, w, h).unwrap();
        let mut code = [0u8; 32];
        let (ox, oy, len) = contour_8conn_bin(&img, &mut code).unwrap();
        assert_eq!((ox, oy), (0, 0));
        assert!(len > 0 && len <= code.len());

        // Every pixel visited while replaying the chain from the
        // origin must be set, and the trace must visit the far corner
        // (2,2) at some point — proof the re-entry pass actually ran
        // and covered the second arm, not just the first loop back to
        // (1,1).
        let off = img.off as usize;
        let rows: Vec<Vec<u8>> = (0..img.h).map(|y| img.row(y).to_vec()).collect();
        let get = |x: i32, y: i32| {
            x >= 0 && y >= 0 && (x as usize) < img.w && (y as usize) < img.h && pixel_get_bin(&rows[y as usize], off + x as usize) != 0
        };
        let (mut x, mut y) = (ox as i32, oy as i32);
        let mut saw_far_corner = false;
        for &c in &code[..len] {
            let dir = (c - b'0') as usize;
            let (dx, dy) = DIRS8[dir];
            x += dx;
            y += dy;
            assert!(get(x, y), "chain code steps onto background at ({x},{y})");
            if (x, y) == (2, 2) {
                saw_far_corner = true;
            }
        }
        assert!(saw_far_corner, "re-entry pass did not reach the second arm");
    }

    #[test]
    fn zero_capacity_buffer_still_reports_length() {
        crate::state::initialize();
        let (buf, dim) = square(3, 3);
        let img = BinImageView::new(buf.as_slice(), dim, 0, 3, 3).unwrap();
        let (_, _, len_with_buf) = contour_8conn_bin(&img, &mut [0u8; 32]).unwrap();
        let (_, _, len_no_buf) = contour_8conn_bin(&img, &mut []).unwrap();
        assert_eq!(len_with_buf, len_no_buf);
    }
}
