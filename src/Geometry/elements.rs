/// Standard atomic weights of the elements H..Kr, amu
pub struct Element {
    pub symbol: &'static str,
    pub atomic_mass: f64,
}

const ELEMENTS: &[Element] = &[
    Element { symbol: "H", atomic_mass: 1.008 },
    Element { symbol: "He", atomic_mass: 4.0026 },
    Element { symbol: "Li", atomic_mass: 6.94 },
    Element { symbol: "Be", atomic_mass: 9.0122 },
    Element { symbol: "B", atomic_mass: 10.81 },
    Element { symbol: "C", atomic_mass: 12.011 },
    Element { symbol: "N", atomic_mass: 14.007 },
    Element { symbol: "O", atomic_mass: 15.999 },
    Element { symbol: "F", atomic_mass: 18.998 },
    Element { symbol: "Ne", atomic_mass: 20.18 },
    Element { symbol: "Na", atomic_mass: 22.99 },
    Element { symbol: "Mg", atomic_mass: 24.305 },
    Element { symbol: "Al", atomic_mass: 26.98 },
    Element { symbol: "Si", atomic_mass: 28.085 },
    Element { symbol: "P", atomic_mass: 30.974 },
    Element { symbol: "S", atomic_mass: 32.065 },
    Element { symbol: "Cl", atomic_mass: 35.45 },
    Element { symbol: "Ar", atomic_mass: 39.948 },
    Element { symbol: "K", atomic_mass: 39.098 },
    Element { symbol: "Ca", atomic_mass: 40.078 },
    Element { symbol: "Sc", atomic_mass: 44.9559 },
    Element { symbol: "Ti", atomic_mass: 47.867 },
    Element { symbol: "V", atomic_mass: 50.9415 },
    Element { symbol: "Cr", atomic_mass: 51.9961 },
    Element { symbol: "Mn", atomic_mass: 54.938 },
    Element { symbol: "Fe", atomic_mass: 55.845 },
    Element { symbol: "Co", atomic_mass: 58.933 },
    Element { symbol: "Ni", atomic_mass: 58.693 },
    Element { symbol: "Cu", atomic_mass: 63.546 },
    Element { symbol: "Zn", atomic_mass: 65.38 },
    Element { symbol: "Ga", atomic_mass: 69.723 },
    Element { symbol: "Ge", atomic_mass: 72.63 },
    Element { symbol: "As", atomic_mass: 74.9216 },
    Element { symbol: "Se", atomic_mass: 78.96 },
    Element { symbol: "Br", atomic_mass: 79.904 },
    Element { symbol: "Kr", atomic_mass: 83.798 },
];

/// element with atomic number Z
pub fn element(Z: u32) -> Option<&'static Element> {
    (Z as usize).checked_sub(1).and_then(|i| ELEMENTS.get(i))
}

pub fn atomic_mass(Z: u32) -> Option<f64> {
    element(Z).map(|e| e.atomic_mass)
}

pub fn atomic_number(symbol: &str) -> Option<u32> {
    ELEMENTS
        .iter()
        .position(|e| e.symbol == symbol)
        .map(|i| i as u32 + 1)
}
