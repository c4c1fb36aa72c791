use day_03::{closest_intersection_distance, minimum_signal_delay};
use std::io::{self, Read};

type Error = Box<dyn std::error::Error>;
type Result<T, E = Error> = std::result::Result<T, E>;

fn main() -> Result<()> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let mut wires = input.lines().map(str::trim).filter(|l| !l.is_empty());
    let wire1 = wires.next().ok_or("Missing the first wire")?;
    let wire2 = wires.next().ok_or("Missing the second wire")?;

    println!("{}", closest_intersection_distance(wire1, wire2)?);
    println!("{}", minimum_signal_delay(wire1, wire2)?);

    Ok(())
}
