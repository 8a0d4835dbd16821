//! Nearest and trilinear reconstruction shared by scalar and gradient grids.

use volvis_math::{Lerp, trilerp};

use crate::{Dims, Vec3};

/// A dense grid that can be read at integer lattice points.
pub(crate) trait Lattice {
    /// Stored cell type. `Default` is the value returned outside the grid.
    type Value: Lerp + Default;

    fn dims(&self) -> Dims;

    /// Reads a cell. Indices must be inside [`Lattice::dims`].
    fn at(&self, x: usize, y: usize, z: usize) -> Self::Value;
}

/// `lo <= coord < hi` on every axis. NaN components fail.
#[inline]
pub(crate) fn within(coord: Vec3, lo: Vec3, hi: Vec3) -> bool {
    coord.cmpge(lo).all() && coord.cmplt(hi).all()
}

/// Closest cell, with ties rounding up.
///
/// The grid is padded by half a voxel on every side before the bounds test,
/// so `-0.5 <= c < dim - 0.5` maps onto a valid cell.
#[inline]
pub(crate) fn nearest<L: Lattice>(lattice: &L, coord: Vec3) -> L::Value {
    let shifted = coord + Vec3::splat(0.5);
    if !within(shifted, Vec3::ZERO, lattice.dims().as_vec3()) {
        return L::Value::default();
    }
    // shifted is non-negative, truncation is floor
    lattice.at(shifted.x as usize, shifted.y as usize, shifted.z as usize)
}

/// Trilinear blend of the floor/ceil neighbours, x then y then z.
///
/// Zero outside `[0, dim)`. On an integer coordinate floor and ceil
/// coincide and the weight is zero, so no span is ever divided by. Above
/// `dim - 1` the ceil neighbour is clamped to the last cell.
#[inline]
pub(crate) fn trilinear<L: Lattice>(lattice: &L, coord: Vec3) -> L::Value {
    let dims = lattice.dims();
    if !within(coord, Vec3::ZERO, dims.as_vec3()) {
        return L::Value::default();
    }

    let lo = coord.floor();
    let hi = coord.ceil();
    let t = coord - lo;

    let x0 = lo.x as usize;
    let y0 = lo.y as usize;
    let z0 = lo.z as usize;
    let x1 = (hi.x as usize).min(dims.x - 1);
    let y1 = (hi.y as usize).min(dims.y - 1);
    let z1 = (hi.z as usize).min(dims.z - 1);

    let corners = [
        lattice.at(x0, y0, z0),
        lattice.at(x1, y0, z0),
        lattice.at(x0, y1, z0),
        lattice.at(x1, y1, z0),
        lattice.at(x0, y0, z1),
        lattice.at(x1, y0, z1),
        lattice.at(x0, y1, z1),
        lattice.at(x1, y1, z1),
    ];
    trilerp(&corners, t.to_array())
}
