//! 遥测机器人演示
//!
//! 模拟宿主环境驱动一轮完整的控制循环：注册一个用 PID 保持航向的
//! 驱动子系统，启动带状态菜单的主 GUI，逐周期发布手柄输入并把每帧
//! 遥测内容打印到终端。

use std::sync::Arc;

use parking_lot::Mutex;

use chassis_sdk::prelude::*;

/// 用 PID 把模拟航向拉回设定值的驱动子系统
struct DriveSubsystem {
    pid: PidController,
    heading: f64,
}

impl DriveSubsystem {
    fn new() -> Self {
        let mut pid = PidController::new(0.05, 0.0, 0.01);
        pid.set_output_clamp(-1.0, 1.0);
        Self { pid, heading: 0.0 }
    }
}

impl Subsystem for DriveSubsystem {
    fn init(&mut self, _ctx: &mut RobotContext) -> anyhow::Result<()> {
        self.pid.init(90.0, self.heading);
        Ok(())
    }

    fn handle(&mut self, ctx: &mut RobotContext) -> anyhow::Result<()> {
        // 摇杆输入叠加在 PID 修正上，模拟驾驶员干预
        let stick = ctx.gamepad1().left_stick_y;
        let power = self.pid.correction(self.heading) + stick * 0.2;

        // 简化的航向动力学
        self.heading += power * 10.0;

        let telemetry = ctx.telemetry();
        telemetry.add_data("Heading", format!("{:.1}", self.heading));
        telemetry.add_data("Power", format!("{power:.3}"));
        Ok(())
    }

    fn stop(&mut self, _ctx: &mut RobotContext) -> anyhow::Result<()> {
        self.pid.disable();
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    chassis_sdk::init_logging();

    println!("🤖 Chassis SDK - 遥测机器人演示");
    println!("==============================\n");

    let sink = Arc::new(Mutex::new(MemorySink::new()));
    let mut builder = RobotBuilder::new("telemetry_bot", Telemetry::new(sink.clone()));
    builder.register("drive", Box::new(DriveSubsystem::new()));
    builder.start_gui(Button::boolean(GamepadId::Primary, BooleanInput::Back))?;

    let mut status = DisplayMenu::new();
    status.add_data("Robot", "telemetry_bot");
    status.add_data("Mode", "teleop");
    builder.add_menu("status", Box::new(status))?;

    let mut robot = builder.build();
    let hub = robot.input_hub();

    robot.init();

    for cycle in 0..10u32 {
        // 模拟驾驶员缓慢推摇杆
        hub.publish(
            GamepadId::Primary,
            GamepadState {
                left_stick_y: -(f64::from(cycle) / 20.0),
                ..Default::default()
            },
        );
        robot.driver_controlled_update();

        println!("—— 周期 {cycle} ——");
        if let Some(frame) = sink.lock().last_frame() {
            for line in frame {
                println!("  {line}");
            }
        }
    }

    robot.stop_all();
    println!("\n✅ 演示结束");
    Ok(())
}
