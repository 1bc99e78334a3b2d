//! Sierpinski gasket generator.
//!
//! The generator only speaks in turtle commands, so it can draw on a live
//! [`Turtle`](crate::Turtle) or record into a `Vec<Command>`. Every call leaves
//! the sink at the pose it started from; the recursion depends on that.

use log::{debug, info};

use crate::color::ColorSource;
use crate::error::{Error, Result};
use crate::math::Pose;
use crate::turtle::{Command, CommandSink};

/// Deeper gaskets only produce sub-pixel triangles
pub const MAX_DEPTH: u32 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasketStats {
    pub depth: u32,
    /// Base triangles drawn, `3^depth`
    pub triangles: u64,
    /// Side length of the base triangles after integer halving
    pub smallest_side: u32,
}

/// Draw a Sierpinski gasket of outer side `side_length` and `depth` levels,
/// anchored at the sink's current position and facing its current heading.
///
/// Depth 0 is a single triangle. Side lengths are halved with integer
/// division at each level, so odd sides shrink slightly faster.
pub fn sierpinski<S, C>(side_length: u32, depth: u32, sink: &mut S, colors: &mut C) -> Result<GasketStats>
where
    S: CommandSink + ?Sized,
    C: ColorSource + ?Sized,
{
    if side_length == 0 {
        return Err(Error::InvalidSideLength);
    }
    if depth > MAX_DEPTH {
        return Err(Error::DepthTooLarge { depth, max: MAX_DEPTH });
    }

    let mut triangles = 0;
    gasket(side_length, depth, sink, colors, &mut triangles)?;

    let stats = GasketStats {
        depth,
        triangles,
        smallest_side: side_length >> depth,
    };
    info!(
        "sierpinski side {side_length} depth {depth}: {} triangles of side {}",
        stats.triangles, stats.smallest_side
    );
    Ok(stats)
}

fn gasket<S, C>(len: u32, levels: u32, sink: &mut S, colors: &mut C, triangles: &mut u64) -> Result<()>
where
    S: CommandSink + ?Sized,
    C: ColorSource + ?Sized,
{
    if levels == 0 {
        return triangle(len, sink, colors, triangles);
    }

    debug!("gasket side {len}, {levels} levels left");
    let half = len / 2;
    let step = f64::from(half);

    // bottom left
    gasket(half, levels - 1, sink, colors, triangles)?;

    // bottom right
    sink.execute(Command::Forward(step))?;
    gasket(half, levels - 1, sink, colors, triangles)?;
    sink.execute(Command::Backward(step))?;

    // top
    sink.execute(Command::Left(60.0))?;
    sink.execute(Command::Forward(step))?;
    sink.execute(Command::Right(60.0))?;
    gasket(half, levels - 1, sink, colors, triangles)?;
    sink.execute(Command::Left(60.0))?;
    sink.execute(Command::Backward(step))?;
    sink.execute(Command::Right(60.0))?;
    Ok(())
}

/// One outlined equilateral triangle, a fresh color per edge.
/// Turns sum to -360, so heading and position come back unchanged.
fn triangle<S, C>(len: u32, sink: &mut S, colors: &mut C, triangles: &mut u64) -> Result<()>
where
    S: CommandSink + ?Sized,
    C: ColorSource + ?Sized,
{
    let side = f64::from(len);
    sink.execute(Command::PenDown)?;
    sink.execute(Command::PenColor(colors.next_color()))?;
    sink.execute(Command::Left(60.0))?;
    sink.execute(Command::Forward(side))?;
    sink.execute(Command::PenColor(colors.next_color()))?;
    sink.execute(Command::Right(120.0))?;
    sink.execute(Command::Forward(side))?;
    sink.execute(Command::PenColor(colors.next_color()))?;
    sink.execute(Command::Right(120.0))?;
    sink.execute(Command::Forward(side))?;
    sink.execute(Command::Right(180.0))?;
    sink.execute(Command::PenUp)?;
    *triangles += 1;
    Ok(())
}

/// Walk recorded commands from `start` and return the pose at every
/// `PenDown`, i.e. the anchor of each base triangle, plus the final pose.
pub fn trace_anchors(commands: &[Command], start: Pose) -> (Vec<Pose>, Pose) {
    let mut pose = start;
    let mut anchors = Vec::new();
    for cmd in commands {
        match *cmd {
            Command::PenDown => anchors.push(pose),
            Command::Left(a) => pose.turn_left(a),
            Command::Right(a) => pose.turn_right(a),
            Command::Forward(d) => (pose.x, pose.y) = pose.advanced(d),
            Command::Backward(d) => (pose.x, pose.y) = pose.advanced(-d),
            Command::PenUp | Command::PenColor(_) | Command::PenSize(_) => {}
        }
    }
    (anchors, pose)
}
