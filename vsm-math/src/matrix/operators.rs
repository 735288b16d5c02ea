use std::fmt::Debug;
use std::ops::{Index, IndexMut};

use super::Matrix;

impl<T> Index<[usize; 2]> for Matrix<T>
where
    T: Default + Clone + Copy + Debug,
{
    type Output = T;

    fn index(&self, indices: [usize; 2]) -> &T {
        let flat_index = self.flat_index(indices);
        &self.data[flat_index]
    }
}

impl<T> IndexMut<[usize; 2]> for Matrix<T>
where
    T: Default + Clone + Copy + Debug,
{
    fn index_mut(&mut self, indices: [usize; 2]) -> &mut T {
        let flat_index = self.flat_index(indices);
        &mut self.data[flat_index]
    }
}
