use anyhow::{anyhow, Context};
use deck_demo::{deck_app, describe, DemoModel};
use swipedeck_testing::DeckRobot;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    let _ = env_logger::try_init();

    let realtime = std::env::args().any(|arg| arg == "--realtime");
    let model = DemoModel::default();
    let node = deck_app(&model);
    let mut robot = if realtime {
        DeckRobot::realtime(node)
    } else {
        DeckRobot::new(node)
    };

    print_deck("mounted", &robot, &model);

    robot.swipe_left(450.0).map_err(anyhow::Error::msg)?;
    robot.wait_for_idle().map_err(anyhow::Error::msg)?;
    robot.assert_settled(2).map_err(anyhow::Error::msg)?;
    print_deck("swipe left 450", &robot, &model);

    robot.swipe_left(280.0).map_err(anyhow::Error::msg)?;
    robot.wait_for_idle().map_err(anyhow::Error::msg)?;
    print_deck("swipe left 280", &robot, &model);

    robot.swipe_right(2000.0).map_err(anyhow::Error::msg)?;
    robot.wait_for_idle().map_err(anyhow::Error::msg)?;
    robot.assert_settled(0).map_err(anyhow::Error::msg)?;
    print_deck("swipe right 2000", &robot, &model);

    robot
        .tap_card("Lisbon")
        .map_err(anyhow::Error::msg)
        .context("tapping the focused card")?;
    let opened = model.opened.borrow().clone();
    if opened != ["lisbon"] {
        return Err(anyhow!("expected a tap on lisbon, recorded {opened:?}"));
    }

    model.selected.set(5);
    robot.wait_for_idle().map_err(anyhow::Error::msg)?;
    print_deck("binding set to 5", &robot, &model);

    println!("done after {} frames, {} redraws", robot.frames(), robot.redraws());
    Ok(())
}

fn print_deck(step: &str, robot: &DeckRobot<deck_demo::Destination>, model: &DemoModel) {
    println!("== {step} (selected {})", model.selected.get());
    for line in describe(robot.node()) {
        println!("  {line}");
    }
}
