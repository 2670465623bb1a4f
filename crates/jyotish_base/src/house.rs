//! Whole-sign house assignment.

/// Whole-sign house number (1-12) of a planet's rashi counted from the
/// ascendant's rashi. Indices are taken modulo 12.
pub const fn assign_house(planet_rashi: u8, ascendant_rashi: u8) -> u8 {
    (planet_rashi % 12 + 12 - ascendant_rashi % 12) % 12 + 1
}

/// Angular distance between two houses in whole houses, 0-6.
pub const fn house_distance(a: u8, b: u8) -> u8 {
    let d = (a % 12 + 12 - b % 12) % 12;
    if d > 6 { 12 - d } else { d }
}
