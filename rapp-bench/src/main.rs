//! Micro-benchmark harness for the `rapp` compute layer.
//!
//! Times a fixed battery of operations over a synthetic image of the
//! requested size and writes a flat text report: the build identifier,
//! the `[width, height]` tested, then one `[name, description,
//! pixelsPerSecond]` line per operation.

use std::io::Write;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use rapp::alloc::{align, AlignedBuffer};
use rapp::image::{row_bytes, BinImageMut, BinImageView, U8ImageMut, U8ImageView};

/// Benchmark the rapp compute layer over a synthetic image.
#[derive(Parser, Debug)]
#[command(name = "rapp-bench")]
struct Args {
    /// Image width in pixels.
    #[arg(short = 'w', long, default_value_t = 512)]
    width: u32,

    /// Image height in pixels.
    #[arg(short = 'h', long, default_value_t = 512)]
    height: u32,

    /// Minimum time to spend timing each operation, in milliseconds.
    #[arg(short = 'm', long, default_value_t = 200)]
    millis: u64,

    /// Write the report to this path instead of stdout.
    #[arg(short = 'o', long)]
    output: Option<String>,
}

struct Bench {
    name: &'static str,
    description: &'static str,
    run: Box<dyn Fn() -> usize>,
}

/// Synthetic buffers shared read-only or read-write across several
/// benches. Kept alive for as long as any `Bench` closure needs them
/// by cloning the `Rc` into each closure's capture.
struct Buffers {
    src_u8: AlignedBuffer,
    dst_u8: AlignedBuffer,
    src_bin: AlignedBuffer,
    dst_bin: AlignedBuffer,
    work: AlignedBuffer,
}

fn build_benches(w: usize, h: usize) -> Vec<Bench> {
    let dim_u8 = align(w);
    let dim_bin = align(row_bytes(w, 0));

    let mut buffers = Buffers {
        src_u8: AlignedBuffer::new(dim_u8 * h).expect("alloc src_u8"),
        dst_u8: AlignedBuffer::new(dim_u8 * h).expect("alloc dst_u8"),
        src_bin: AlignedBuffer::new(dim_bin * h).expect("alloc src_bin"),
        dst_bin: AlignedBuffer::new(dim_bin * h).expect("alloc dst_bin"),
        work: AlignedBuffer::new(rapp::morph::worksize_bin_raw(dim_bin, h)).expect("alloc work"),
    };
    for (i, b) in buffers.src_u8.as_mut_slice().iter_mut().enumerate() {
        *b = (i % 256) as u8;
    }
    for b in buffers.src_bin.as_mut_slice().iter_mut().step_by(3) {
        *b = 0xAA;
    }

    let src_u8_ptr = buffers.src_u8.as_ptr();
    let src_u8_len = buffers.src_u8.len();
    let dst_u8_ptr = buffers.dst_u8.as_mut_ptr();
    let dst_u8_len = buffers.dst_u8.len();
    let src_bin_ptr = buffers.src_bin.as_ptr();
    let src_bin_len = buffers.src_bin.len();
    let dst_bin_ptr = buffers.dst_bin.as_mut_ptr();
    let dst_bin_len = buffers.dst_bin.len();
    let work_ptr = buffers.work.as_mut_ptr();
    let work_len = buffers.work.len();

    // `buffers` itself is never touched again: every access below goes
    // through the raw pointers captured above, valid as long as some
    // clone of `keep` is alive.
    let keep = Rc::new(buffers);

    vec![
        Bench {
            name: "pixop_add_u8",
            description: "saturating per-pixel add of two 8-bit rasters",
            run: {
                let keep = Rc::clone(&keep);
                Box::new(move || {
                    let _keep = &keep;
                    // SAFETY: `keep` keeps the backing allocation alive for
                    // as long as this closure exists; no other alias of
                    // `dst_u8_ptr` is created while this call is in flight.
                    let src = unsafe { std::slice::from_raw_parts(src_u8_ptr, src_u8_len) };
                    let dst = unsafe { std::slice::from_raw_parts_mut(dst_u8_ptr, dst_u8_len) };
                    let src_view = U8ImageView::new(src, dim_u8, w, h).unwrap();
                    let mut dst_view = U8ImageMut::new(dst, dim_u8, w, h).unwrap();
                    rapp::pixop::pixop_add_u8(&mut dst_view, &src_view).unwrap();
                    w * h
                })
            },
        },
        Bench {
            name: "thresh_gt_u8",
            description: "per-pixel greater-than threshold, 8-bit to binary",
            run: {
                let keep = Rc::clone(&keep);
                Box::new(move || {
                    let _keep = &keep;
                    let src = unsafe { std::slice::from_raw_parts(src_u8_ptr, src_u8_len) };
                    let dst = unsafe { std::slice::from_raw_parts_mut(dst_bin_ptr, dst_bin_len) };
                    let src_view = U8ImageView::new(src, dim_u8, w, h).unwrap();
                    let mut dst_view = BinImageMut::new(dst, dim_bin, 0, w, h).unwrap();
                    rapp::thresh::thresh_gt_u8(&mut dst_view, &src_view, 127).unwrap();
                    w * h
                })
            },
        },
        Bench {
            name: "bitblt_or_bin",
            description: "word-at-a-time OR of two bit-packed binary rasters",
            run: {
                let keep = Rc::clone(&keep);
                Box::new(move || {
                    let _keep = &keep;
                    let src = unsafe { std::slice::from_raw_parts(src_bin_ptr, src_bin_len) };
                    let dst = unsafe { std::slice::from_raw_parts_mut(dst_bin_ptr, dst_bin_len) };
                    let src_view = BinImageView::new(src, dim_bin, 0, w, h).unwrap();
                    let mut dst_view = BinImageMut::new(dst, dim_bin, 0, w, h).unwrap();
                    rapp::bitblt::bitblt_bin_native(&mut dst_view, &src_view, w, h, rapp::bitblt::RasterOp::Or).unwrap();
                    w * h
                })
            },
        },
        Bench {
            name: "dilate_rect3x3_bin",
            description: "3x3 rectangular dilation via log-doubling decomposition",
            run: {
                let keep = Rc::clone(&keep);
                Box::new(move || {
                    let _keep = &keep;
                    let src = unsafe { std::slice::from_raw_parts(src_bin_ptr, src_bin_len) };
                    let dst = unsafe { std::slice::from_raw_parts_mut(dst_bin_ptr, dst_bin_len) };
                    let work = unsafe { std::slice::from_raw_parts_mut(work_ptr, work_len) };
                    rapp::morph::dilate_rect_bin(dst, src, work, dim_bin, h, 3, 3).unwrap();
                    w * h
                })
            },
        },
        Bench {
            name: "stat_sum_bin",
            description: "population count of a bit-packed binary raster",
            run: {
                let keep = Rc::clone(&keep);
                Box::new(move || {
                    let _keep = &keep;
                    let src = unsafe { std::slice::from_raw_parts(src_bin_ptr, src_bin_len) };
                    let view = BinImageView::new(src, dim_bin, 0, w, h).unwrap();
                    let _ = rapp::stat::stat_sum_bin(&view);
                    w * h
                })
            },
        },
    ]
}

/// Runs `bench.run` repeatedly for at least `min_duration`, returning
/// pixels processed per second.
fn time_bench(bench: &Bench, min_duration: Duration) -> f64 {
    let mut iters = 0u64;
    let mut pixels = 0u64;
    let start = Instant::now();
    loop {
        pixels += bench.run.as_ref()() as u64;
        iters += 1;
        if start.elapsed() >= min_duration && iters >= 3 {
            break;
        }
    }
    let elapsed = start.elapsed().as_secs_f64();
    if elapsed <= 0.0 {
        0.0
    } else {
        pixels as f64 / elapsed
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.width == 0 || args.height == 0 {
        eprintln!("rapp-bench: width and height must both be positive");
        std::process::exit(1);
    }

    rapp::state::initialize();
    log::info!("running rapp-bench over {}x{}", args.width, args.height);

    let (w, h) = (args.width as usize, args.height as usize);
    let benches = build_benches(w, h);
    let min_duration = Duration::from_millis(args.millis);

    let mut report = String::new();
    report.push_str(&format!("build = \"{}\"\n", env!("CARGO_PKG_VERSION")));
    report.push_str(&format!("size = [{}, {}]\n", args.width, args.height));
    for bench in &benches {
        let pps = time_bench(bench, min_duration);
        report.push_str(&format!("[\"{}\", \"{}\", {:.1}]\n", bench.name, bench.description, pps));
    }

    rapp::state::terminate();

    let result = match &args.output {
        Some(path) => std::fs::write(path, &report),
        None => std::io::stdout().write_all(report.as_bytes()),
    };
    if let Err(e) = result {
        eprintln!("rapp-bench: failed to write report: {e}");
        std::process::exit(2);
    }
}
