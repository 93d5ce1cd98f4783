//! Standard atomic weights

/// An element symbol and its atomic mass in g/mol
#[derive(Debug, Clone, Copy)]
pub struct Element {
    pub symbol: &'static str,
    pub atomic_mass: f64,
}

const fn element(symbol: &'static str, atomic_mass: f64) -> Element {
    Element {
        symbol,
        atomic_mass,
    }
}

pub const ELEMENTS: &[Element] = &[
    element("H", 1.00794),
    element("He", 4.002602),
    element("Li", 6.941),
    element("Be", 9.012182),
    element("B", 10.811),
    element("C", 12.0107),
    element("N", 14.0067),
    element("O", 15.9994),
    element("F", 18.9984032),
    element("Ne", 20.1797),
    element("Na", 22.98976928),
    element("Mg", 24.305),
    element("Al", 26.9815386),
    element("Si", 28.0855),
    element("P", 30.973762),
    element("S", 32.065),
    element("Cl", 35.453),
    element("Ar", 39.948),
    element("K", 39.0983),
    element("Ca", 40.078),
    element("Sc", 44.955912),
    element("Ti", 47.867),
    element("V", 50.9415),
    element("Cr", 51.9961),
    element("Mn", 54.938045),
    element("Fe", 55.845),
    element("Co", 58.933195),
    element("Ni", 58.6934),
    element("Cu", 63.546),
    element("Zn", 65.38),
    element("Ga", 69.723),
    element("Ge", 72.64),
    element("As", 74.9216),
    element("Se", 78.96),
    element("Br", 79.904),
    element("Kr", 83.798),
    element("Rb", 85.4678),
    element("Sr", 87.62),
    element("Y", 88.90585),
    element("Zr", 91.224),
    element("Nb", 92.90638),
    element("Mo", 95.96),
    element("Tc", 98.0),
    element("Ru", 101.07),
    element("Rh", 102.9055),
    element("Pd", 106.42),
    element("Ag", 107.8682),
    element("Cd", 112.411),
    element("In", 114.818),
    element("Sn", 118.71),
    element("Sb", 121.76),
    element("Te", 127.6),
    element("I", 126.90447),
    element("Xe", 131.293),
    element("Cs", 132.9054519),
    element("Ba", 137.327),
    element("La", 138.90547),
    element("Ce", 140.116),
    element("Pr", 140.90765),
    element("Nd", 144.242),
    element("Pm", 145.0),
    element("Sm", 150.36),
    element("Eu", 151.964),
    element("Gd", 157.25),
    element("Tb", 158.92535),
    element("Dy", 162.5),
    element("Ho", 164.93032),
    element("Er", 167.259),
    element("Tm", 168.93421),
    element("Yb", 173.054),
    element("Lu", 174.9668),
    element("Hf", 178.49),
    element("Ta", 180.94788),
    element("W", 183.84),
    element("Re", 186.207),
    element("Os", 190.23),
    element("Ir", 192.217),
    element("Pt", 195.084),
    element("Au", 196.966569),
    element("Hg", 200.59),
    element("Tl", 204.3833),
    element("Pb", 207.2),
    element("Bi", 208.9804),
    element("Po", 209.0),
    element("At", 210.0),
    element("Rn", 222.0),
    element("Fr", 223.0),
    element("Ra", 226.0),
    element("Ac", 227.0),
    element("Th", 232.03806),
    element("Pa", 231.03588),
    element("U", 238.02891),
    element("Np", 237.0),
    element("Pu", 244.0),
];

/// Atomic mass of an element symbol (case-sensitive)
pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|element| element.symbol == symbol)
        .map(|element| element.atomic_mass)
}
