use super::metabolism::sprout_cost;
use super::{Color, Creature, Kind, Species};
use crate::world::bounds::{Bounds, Vec2};
use rand::Rng;

/// Offspring of a mating pair land within this jitter of the initiator.
pub const PAIR_JITTER: f64 = 10.0;
/// Plant clones scatter further than animal offspring.
pub const SPROUT_JITTER: f64 = 50.0;

const SPROUT_CHANCE_SCALE: f64 = 100_000.0;

/// Traits of the non-initiating parent, copied out so the initiator can
/// be borrowed mutably while the partner stays in the registry.
#[derive(Debug, Clone, Copy)]
pub struct PartnerTraits {
    pub color: Color,
    pub radius: f64,
    pub vision: f64,
    pub speed: f64,
}

impl PartnerTraits {
    /// None for plants; pair breeding is an animal affair.
    pub fn of(creature: &Creature) -> Option<Self> {
        let state = creature.animal()?;
        Some(Self {
            color: creature.color,
            radius: creature.radius,
            vision: state.vision,
            speed: state.speed,
        })
    }
}

impl Creature {
    /// Spawn an offspring with `partner`: channel-averaged color, mean
    /// traits, position jittered around the initiator, gender rolled
    /// fresh. Costs the initiator one radius worth of energy and clears
    /// its mating urge. Returns None for plants.
    pub fn conceive(
        &mut self,
        partner: &PartnerTraits,
        offspring_id: u64,
        bounds: &Bounds,
        rng: &mut impl Rng,
    ) -> Option<Creature> {
        let state = self.animal()?;
        let vision = (state.vision + partner.vision) / 2.0;
        let speed = (state.speed + partner.speed) / 2.0;

        let radius = (self.radius + partner.radius) / 2.0;
        let color = self.color.blend(partner.color);
        let pos = self.pos + jitter(PAIR_JITTER, rng);
        let gender = rng.gen_bool(0.5);
        let max_energy = self.metabolism.max_energy();

        let offspring = match self.species() {
            Species::Herbivore => Creature::herbivore(
                offspring_id, bounds, pos, radius, color, gender, vision, speed, max_energy, rng,
            ),
            Species::Carnivore => Creature::carnivore(
                offspring_id, bounds, pos, radius, color, gender, vision, speed, max_energy, rng,
            ),
            Species::Plant => return None,
        };

        self.metabolism.drain(self.radius);
        if let Some(state) = self.animal_mut() {
            state.horny = false;
        }
        self.offspring_count += 1;

        Some(offspring)
    }

    /// Per-tick sprout roll for plants. With probability radius/100000
    /// a clone lands nearby and the parent pays the sprout cost.
    pub fn try_sprout(
        &mut self,
        offspring_id: u64,
        bounds: &Bounds,
        rng: &mut impl Rng,
    ) -> Option<Creature> {
        if !matches!(self.kind, Kind::Plant) {
            return None;
        }
        if rng.gen_range(0.0..SPROUT_CHANCE_SCALE) >= self.radius {
            return None;
        }

        let pos = self.pos + jitter(SPROUT_JITTER, rng);
        let clone = Creature::plant(
            offspring_id,
            bounds,
            pos,
            self.radius,
            self.color,
            self.metabolism.max_energy(),
        );

        self.metabolism.drain(sprout_cost(self.radius, self.nutrition()));
        self.offspring_count += 1;

        Some(clone)
    }
}

fn jitter(extent: f64, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(rng.gen_range(-extent..=extent), rng.gen_range(-extent..=extent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 800.0)
    }

    fn pair() -> (Creature, Creature) {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let father = Creature::herbivore(
            1,
            &bounds(),
            Vec2::new(100.0, 100.0),
            4.0,
            Color::new(0.0, 0.0, 200.0),
            true,
            60.0,
            20.0,
            3000.0,
            &mut rng,
        );
        let mother = Creature::herbivore(
            2,
            &bounds(),
            Vec2::new(105.0, 100.0),
            8.0,
            Color::new(0.0, 0.0, 100.0),
            false,
            100.0,
            16.0,
            3000.0,
            &mut rng,
        );
        (father, mother)
    }

    #[test]
    fn test_conceive_averages_traits() {
        let (mut father, mother) = pair();
        let mut rng = ChaCha12Rng::seed_from_u64(42);

        let partner = PartnerTraits::of(&mother).unwrap();
        let child = father.conceive(&partner, 3, &bounds(), &mut rng).unwrap();

        assert_eq!(child.species(), Species::Herbivore);
        assert_eq!(child.radius, 6.0);
        assert_eq!(child.color, Color::new(0.0, 0.0, 150.0));

        let state = child.animal().unwrap();
        assert_eq!(state.vision, 80.0);
        assert_eq!(state.speed, 18.0);
    }

    #[test]
    fn test_conceive_costs_the_initiator() {
        let (mut father, mother) = pair();
        let mut rng = ChaCha12Rng::seed_from_u64(42);

        father.animal_mut().unwrap().horny = true;
        let partner = PartnerTraits::of(&mother).unwrap();
        father.conceive(&partner, 3, &bounds(), &mut rng).unwrap();

        assert_eq!(father.energy(), 3000.0 - father.radius);
        assert!(!father.animal().unwrap().horny);
        assert_eq!(father.offspring_count, 1);
    }

    #[test]
    fn test_offspring_lands_near_the_initiator() {
        let (mut father, mother) = pair();
        let partner = PartnerTraits::of(&mother).unwrap();
        let mut rng = ChaCha12Rng::seed_from_u64(9);

        for id in 0..50 {
            let child = father.conceive(&partner, 10 + id, &bounds(), &mut rng).unwrap();
            assert!((child.pos.x - father.pos.x).abs() <= PAIR_JITTER);
            assert!((child.pos.y - father.pos.y).abs() <= PAIR_JITTER);
            assert!(bounds().contains(child.pos));
        }
    }

    #[test]
    fn test_plants_do_not_pair_breed() {
        let mut plant = Creature::plant(
            1,
            &bounds(),
            Vec2::new(10.0, 10.0),
            5.0,
            Color::new(0.0, 200.0, 0.0),
            3000.0,
        );
        let (_, mother) = pair();
        let partner = PartnerTraits::of(&mother).unwrap();
        let mut rng = ChaCha12Rng::seed_from_u64(1);

        assert!(plant.conceive(&partner, 2, &bounds(), &mut rng).is_none());
        assert!(PartnerTraits::of(&plant).is_none());
    }

    #[test]
    fn test_sprout_clones_the_parent() {
        let mut plant = Creature::plant(
            1,
            &bounds(),
            Vec2::new(400.0, 400.0),
            9.0,
            Color::new(0.0, 180.0, 0.0),
            3000.0,
        );
        let mut rng = ChaCha12Rng::seed_from_u64(0);

        // The roll is rare (radius/100000 per tick); drive it until it fires.
        let mut sprouted = None;
        for id in 0..200_000u64 {
            if let Some(clone) = plant.try_sprout(2 + id, &bounds(), &mut rng) {
                sprouted = Some(clone);
                break;
            }
        }

        let clone = sprouted.expect("sprout roll never fired");
        assert_eq!(clone.species(), Species::Plant);
        assert_eq!(clone.radius, plant.radius);
        assert_eq!(clone.color, plant.color);
        assert!((clone.pos.x - plant.pos.x).abs() <= SPROUT_JITTER);
        assert!((clone.pos.y - plant.pos.y).abs() <= SPROUT_JITTER);

        let cost = sprout_cost(plant.radius, plant.nutrition());
        assert!((plant.energy() - (3000.0 - cost)).abs() < 1e-9);
        assert_eq!(plant.offspring_count, 1);
    }

    #[test]
    fn test_animals_do_not_sprout() {
        let (mut father, _) = pair();
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        assert!(father.try_sprout(99, &bounds(), &mut rng).is_none());
    }
}
