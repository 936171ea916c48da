// SPDX-License-Identifier: MIT
// 384-bit unsigned integer used as the intermediate for Q64.128 arithmetic

use uint::construct_uint;

construct_uint! {
    /// Unsigned 384-bit integer, little-endian 64-bit words.
    ///
    /// Wide enough to hold the product of two Q64.128 values (a Q128.256)
    /// and a Q64.128 value shifted left by 128 bits, so every intermediate
    /// in the fixed-point layer is exact.
    pub struct U384(6);
}
