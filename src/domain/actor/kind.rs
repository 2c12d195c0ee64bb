/// Actor types and their behaviour families.
///
/// Every placeable thing in a level that is not a plain tile is an actor of
/// one `ActorType`. Types are grouped into families; all types of a family
/// share one behaviour implementation and differ only in the per-type tables
/// (sizes, frame counts, points, contents) the family consults.

use super::super::hero::{Inventory, Letter};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum KeyColor {
    Red,
    Blue,
    Pink,
    Green,
}

impl KeyColor {
    pub fn key(self) -> Inventory {
        match self {
            KeyColor::Red => Inventory::KEY_RED,
            KeyColor::Blue => Inventory::KEY_BLUE,
            KeyColor::Pink => Inventory::KEY_PINK,
            KeyColor::Green => Inventory::KEY_GREEN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KeyColor::Red => "red",
            KeyColor::Blue => "blue",
            KeyColor::Pink => "pink",
            KeyColor::Green => "green",
        }
    }
}

/// What a door waits for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Lock {
    Key(KeyColor),
    AccessCard,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Family {
    Placeholder,
    Animation,
    SingleAnimation,
    ScorePopup,
    Particle,
    Walker,
    WallCrawler,
    RedBall,
    Camera,
    Spikes,
    Fire,
    Acme,
    Mill,
    Bomb,
    BombFire,
    HostileShot,
    Door,
    Keyhole,
    GloveSlot,
    ExpandingFloor,
    Lift,
    ExitDoor,
    Teleporter,
    Conveyor,
    UnstableFloor,
    Fan,
    Item,
    SodaFlying,
    Box,
    Rocket,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ActorType {
    // ── Bots ──
    Robot,
    RobotDisappearing,
    FlameGnomeBot,
    FootBot,
    FireWheelBot,
    TankBot,
    WallCrawlerBotLeft,
    WallCrawlerBotRight,
    RedBallJumping,
    RedBallLying,
    Camera,
    FlyingBot,
    HelicopterBot,
    SnakeBot,
    RabbitoidBot,
    DrProton,

    // ── Hazards ──
    SpikesUp,
    SpikesDown,
    Spike,
    ElectricArc,
    FireRight,
    FireLeft,
    Acme,
    Mill,
    Bomb,
    BombFire,
    HostileShotLeft,
    HostileShotRight,
    LaserBeam,
    Water,

    // ── Mechanisms ──
    Lift,
    DoorRed,
    DoorBlue,
    DoorPink,
    DoorGreen,
    KeyholeRed,
    KeyholeBlue,
    KeyholePink,
    KeyholeGreen,
    AccessCardSlot,
    AccessCardDoor,
    GloveSlot,
    ExpandingFloor,
    ExitDoor,
    Teleporter1,
    Teleporter2,
    ConveyorLeft,
    ConveyorRight,
    UnstableFloor,
    FanLeft,
    FanRight,
    Rocket,

    // ── Items ──
    KeyRed,
    KeyBlue,
    KeyPink,
    KeyGreen,
    AccessCard,
    Glove,
    Boot,
    Clamp,
    Gun,
    FullLife,
    Soda,
    SodaFlying,
    ChickenSingle,
    ChickenDouble,
    Football,
    Flag,
    Radio,
    Joystick,
    Disk,
    Balloon,
    Notebook,
    LetterD,
    LetterU,
    LetterK,
    LetterE,
    LetterM,

    // ── Boxes ──
    BoxGreyEmpty,
    BoxGreyBoot,
    BoxGreyClamp,
    BoxGreyGun,
    BoxGreyBomb,
    BoxGreyGlove,
    BoxGreyFullLife,
    BoxGreyAccessCard,
    BoxGreyLetterD,
    BoxGreyLetterU,
    BoxGreyLetterK,
    BoxGreyLetterE,
    BoxGreyLetterM,
    BoxRedSoda,
    BoxRedChicken,
    BoxBlueFootball,
    BoxBlueJoystick,
    BoxBlueDisk,
    BoxBlueBalloon,
    BoxBlueFlag,
    BoxBlueRadio,

    // ── Decorations ──
    Screen,
    SurveillanceScreen,
    BrokenWallBg,
    StoneBg,
    FenceBg,
    StoneWindowBg,
    WindowLeftBg,
    WindowRightBg,
    BlueLightBg,
    GreenPoisonBg,
    HighVoltageFlashBg,

    // ── Effects ──
    Explosion,
    DustCloud,
    Steam,
    ParticleGrey,
    ParticleRed,
    ParticleBlue,
    ParticleGreen,
    Score100,
    Score200,
    Score500,
    Score1000,
    Score2000,
    Score5000,
    Score10000,
}

impl ActorType {
    pub fn family(self) -> Family {
        use ActorType::*;
        match self {
            Robot | FlameGnomeBot | FootBot | FireWheelBot | TankBot => Family::Walker,
            WallCrawlerBotLeft | WallCrawlerBotRight => Family::WallCrawler,
            RedBallJumping | RedBallLying => Family::RedBall,
            Camera => Family::Camera,
            FlyingBot | HelicopterBot | SnakeBot | RabbitoidBot | DrProton => Family::Placeholder,

            SpikesUp | SpikesDown | Spike | ElectricArc => Family::Spikes,
            FireRight | FireLeft => Family::Fire,
            Acme => Family::Acme,
            Mill => Family::Mill,
            Bomb => Family::Bomb,
            BombFire => Family::BombFire,
            HostileShotLeft | HostileShotRight => Family::HostileShot,
            LaserBeam | Water => Family::Placeholder,

            Lift => Family::Lift,
            DoorRed | DoorBlue | DoorPink | DoorGreen | AccessCardDoor => Family::Door,
            KeyholeRed | KeyholeBlue | KeyholePink | KeyholeGreen | AccessCardSlot => Family::Keyhole,
            GloveSlot => Family::GloveSlot,
            ExpandingFloor => Family::ExpandingFloor,
            ExitDoor => Family::ExitDoor,
            Teleporter1 | Teleporter2 => Family::Teleporter,
            ConveyorLeft | ConveyorRight => Family::Conveyor,
            UnstableFloor => Family::UnstableFloor,
            FanLeft | FanRight => Family::Fan,
            Rocket => Family::Rocket,

            KeyRed | KeyBlue | KeyPink | KeyGreen | AccessCard | Glove | Boot | Clamp | Gun
            | FullLife | Soda | ChickenSingle | ChickenDouble | Football | Flag | Radio
            | Joystick | Disk | Balloon | Notebook | LetterD | LetterU | LetterK | LetterE
            | LetterM => Family::Item,
            SodaFlying => Family::SodaFlying,

            BoxGreyEmpty | BoxGreyBoot | BoxGreyClamp | BoxGreyGun | BoxGreyBomb | BoxGreyGlove
            | BoxGreyFullLife | BoxGreyAccessCard | BoxGreyLetterD | BoxGreyLetterU
            | BoxGreyLetterK | BoxGreyLetterE | BoxGreyLetterM | BoxRedSoda | BoxRedChicken
            | BoxBlueFootball | BoxBlueJoystick | BoxBlueDisk | BoxBlueBalloon | BoxBlueFlag
            | BoxBlueRadio => Family::Box,

            BrokenWallBg | StoneBg | FenceBg | StoneWindowBg | WindowLeftBg | WindowRightBg
            | Screen | SurveillanceScreen => Family::Animation,
            BlueLightBg | GreenPoisonBg | HighVoltageFlashBg => Family::Placeholder,

            Explosion | DustCloud | Steam | RobotDisappearing => Family::SingleAnimation,
            ParticleGrey | ParticleRed | ParticleBlue | ParticleGreen => Family::Particle,
            Score100 | Score200 | Score500 | Score1000 | Score2000 | Score5000 | Score10000 => {
                Family::ScorePopup
            }
        }
    }

    /// Drawn before the tile layer.
    pub fn is_background(self) -> bool {
        use ActorType::*;
        matches!(
            self,
            BrokenWallBg
                | StoneBg
                | FenceBg
                | StoneWindowBg
                | WindowLeftBg
                | WindowRightBg
                | BlueLightBg
                | GreenPoisonBg
                | HighVoltageFlashBg
        )
    }

    pub fn lock(self) -> Option<Lock> {
        use ActorType::*;
        match self {
            DoorRed | KeyholeRed => Some(Lock::Key(KeyColor::Red)),
            DoorBlue | KeyholeBlue => Some(Lock::Key(KeyColor::Blue)),
            DoorPink | KeyholePink => Some(Lock::Key(KeyColor::Pink)),
            DoorGreen | KeyholeGreen => Some(Lock::Key(KeyColor::Green)),
            AccessCardDoor | AccessCardSlot => Some(Lock::AccessCard),
            _ => None,
        }
    }

    pub fn letter(self) -> Option<Letter> {
        use ActorType::*;
        match self {
            LetterD => Some(Letter::D),
            LetterU => Some(Letter::U),
            LetterK => Some(Letter::K),
            LetterE => Some(Letter::E),
            LetterM => Some(Letter::M),
            _ => None,
        }
    }

    /// Score popup type showing exactly `points`, if one exists.
    pub fn score_popup(points: u64) -> Option<ActorType> {
        use ActorType::*;
        match points {
            100 => Some(Score100),
            200 => Some(Score200),
            500 => Some(Score500),
            1000 => Some(Score1000),
            2000 => Some(Score2000),
            5000 => Some(Score5000),
            10000 => Some(Score10000),
            _ => None,
        }
    }

    pub fn score_value(self) -> u64 {
        use ActorType::*;
        match self {
            Score100 => 100,
            Score200 => 200,
            Score500 => 500,
            Score1000 => 1000,
            Score2000 => 2000,
            Score5000 => 5000,
            Score10000 => 10000,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locks_pair_keyholes_with_doors() {
        assert_eq!(ActorType::KeyholeBlue.lock(), ActorType::DoorBlue.lock());
        assert_eq!(ActorType::AccessCardSlot.lock(), Some(Lock::AccessCard));
        assert_eq!(ActorType::Robot.lock(), None);
    }

    #[test]
    fn score_popups_round_trip_their_value() {
        for points in [100, 200, 500, 1000, 2000, 5000, 10000] {
            let popup = ActorType::score_popup(points).unwrap();
            assert_eq!(popup.score_value(), points);
            assert_eq!(popup.family(), Family::ScorePopup);
        }
        assert_eq!(ActorType::score_popup(300), None);
    }

    #[test]
    fn only_decorations_are_background() {
        assert!(ActorType::StoneBg.is_background());
        assert!(!ActorType::Screen.is_background());
        assert!(!ActorType::Explosion.is_background());
    }
}
