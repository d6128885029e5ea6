/// Dimension vector after growing axis `axis` by `quantity` hyperplanes.
///
/// Every other extent is carried over unchanged.
pub fn new_dimensions(dims: &[usize], axis: usize, quantity: usize) -> Vec<usize> {
    let mut grown = dims.to_vec();
    grown[axis] += quantity;
    grown
}
