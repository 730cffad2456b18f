use std::env;
use std::str::FromStr;

use factorfft::planner::Direction;
use factorfft::{Axis, ElementType, KernelFamily, Options};

/// Lists a family of power-of-two and power-of-three kernels, then runs the one with the
/// given id on an impulse.
fn main() {
    let args: Vec<String> = env::args().collect();
    assert_eq!(args.len(), 2, "Usage {} <id>", args[0]);
    let id = usize::from_str(&args[1]).unwrap();

    let family = KernelFamily::new(
        Axis::powers(2, 1, 12).chain(Axis::powers(3, 1, 7)),
        &[Direction::Forward, Direction::Inverse],
        &[ElementType::F32, ElementType::F64],
        Options::default(),
    );
    for (configuration, id) in family.configurations() {
        println!(
            "{id:4}: N = {:5}, {:?}, {}",
            configuration.len, configuration.direction, configuration.element
        );
    }

    let kernel = family.select(id).unwrap();
    match kernel.element_type() {
        ElementType::F32 => {
            let mut data = vec![0.0_f32; 2 * kernel.len()];
            data[0] = 1.0;
            kernel.apply(&mut data).unwrap();
            println!("{:?}", &data[..data.len().min(8)]);
        }
        ElementType::F64 => {
            let mut data = vec![0.0_f64; 2 * kernel.len()];
            data[0] = 1.0;
            kernel.apply(&mut data).unwrap();
            println!("{:?}", &data[..data.len().min(8)]);
        }
    }
}
