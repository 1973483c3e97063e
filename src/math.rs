use bevy::math::{Mat2, UVec2, Vec2};

pub type Real = f32;

pub type Vector = Vec2;
pub type Matrix = Mat2;
pub type Coord = UVec2;

#[inline(always)]
pub fn zero_matrix() -> Matrix {
    Mat2::ZERO
}

#[inline(always)]
pub fn matrix_trace(m: &Matrix) -> Real {
    m.x_axis.x + m.y_axis.y
}

#[inline(always)]
pub fn diagonal_from_value(value: Real) -> Matrix {
    Matrix::from_diagonal(Vec2::splat(value))
}

/// `a * bᵀ`, so that `outer_product(a, b) * c == a * b.dot(c)`.
#[inline(always)]
pub fn outer_product(a: Vector, b: Vector) -> Matrix {
    Matrix::from_cols(a * b.x, a * b.y)
}

#[inline(always)]
pub fn matrix_is_finite(m: &Matrix) -> bool {
    m.x_axis.is_finite() && m.y_axis.is_finite()
}
