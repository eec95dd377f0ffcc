use complementary_ahrs::{ComplementaryFilter, QuaternionExt};
use nalgebra::Vector3;

const TICK_PERIOD: f32 = 0.01; // 10 ms control loop

fn main() {
    let mut filter = match ComplementaryFilter::initialize(TICK_PERIOD) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("invalid filter configuration: {err}");
            return;
        }
    };

    for _ in 0..10 {
        // this loop should repeat once per control-loop tick
        let gyroscope = Vector3::new(0.0, 0.0, 0.0); // replace this with actual gyroscope data in rad/s
        let accelerometer = Vector3::new(0.0, 0.0, 9.81); // replace this with actual accelerometer data

        let estimate = filter.update(gyroscope, accelerometer);
        if estimate.flags.accelerometer_ignored {
            println!("accelerometer correction skipped");
        }

        let euler = estimate.quaternion.to_euler_degrees();
        println!(
            "Roll: {:.2}, Pitch: {:.2}, Yaw: {:.2}",
            euler.x, euler.y, euler.z
        );
    }
}
